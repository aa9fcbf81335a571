//! Authentication seam used by the login flow.
use async_trait::async_trait;

use crate::Error;
use crate::error::AuthError;
use crate::user::AuthenticatedAdmin;

/// What an admin types into the login form.
///
/// `identifier` is an email address or a username, depending on which login
/// variant the authenticator implements.
#[derive(Clone)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials from raw form input; both fields are trimmed.
    pub fn new(identifier: &str, password: &str) -> Self {
        Self {
            identifier: identifier.trim().to_string(),
            password: password.trim().to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Verifies credentials against some source of admin accounts.
///
/// Only consulted when the lockout guard allows the attempt. Every `Err`,
/// storage errors included, is counted as a failed attempt except
/// [`AuthError::UnauthorizedRole`], which means the password was right but the
/// account may not use the console.
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthenticatedAdmin, Error>;
}

impl Error {
    /// Whether this authentication outcome counts against the lockout counter.
    pub fn counts_as_failure(&self) -> bool {
        !matches!(self, Error::Auth(AuthError::UnauthorizedRole(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn test_credentials_are_trimmed() {
        let credentials = Credentials::new("  admin@studio.test ", " secret123 ");
        assert_eq!(credentials.identifier, "admin@studio.test");
        assert_eq!(credentials.password, "secret123");
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("admin", "hunter22");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_role_problems_do_not_count_as_failures() {
        assert!(Error::Auth(AuthError::InvalidCredentials).counts_as_failure());
        assert!(Error::Storage(StorageError::Connection("down".to_string())).counts_as_failure());
        assert!(!Error::Auth(AuthError::UnauthorizedRole("Owner".to_string())).counts_as_failure());
    }
}
