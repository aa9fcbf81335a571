use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    Error,
    auth::{Authenticator, Credentials},
    error::AuthError,
    id::UserId,
    repositories::AdminRepository,
    user::{AdminAccount, AdminRole, AuthenticatedAdmin, NewAdmin},
    validation::{validate_email, validate_password, validate_username},
};

/// Password sign-in for admin accounts.
///
/// Accepts either the admin's email or username as the identifier, which
/// covers both login forms of the console. An unknown identifier and a wrong
/// password are indistinguishable to the caller.
pub struct PasswordAuthenticator<R: AdminRepository> {
    admins: Arc<R>,
}

impl<R: AdminRepository> PasswordAuthenticator<R> {
    pub fn new(admins: Arc<R>) -> Self {
        Self { admins }
    }

    /// Create an admin account with a hashed password.
    ///
    /// Inputs are trimmed like [`Credentials`], so the account can sign in
    /// with the same strings it was created with.
    pub async fn create_admin(
        &self,
        email: &str,
        username: &str,
        password: &str,
        role: AdminRole,
    ) -> Result<AdminAccount, Error> {
        let (email, username, password) = (email.trim(), username.trim(), password.trim());

        validate_email(email)?;
        validate_username(username)?;
        validate_password(password)?;

        let account = self
            .admins
            .create(NewAdmin {
                id: UserId::new_admin(),
                email: email.to_string(),
                username: username.to_string(),
                password_hash: Self::hash_password(password),
                role,
            })
            .await?;

        tracing::info!(admin_id = %account.id, role = %role, "Created admin account");
        Ok(account)
    }

    /// Hash a password using argon2
    fn hash_password(password: &str) -> String {
        password_auth::generate_hash(password)
    }

    /// Verify a password against a hash
    fn verify_password(password: &str, hash: &str) -> bool {
        password_auth::verify_password(password, hash).is_ok()
    }
}

#[async_trait]
impl<R: AdminRepository> Authenticator for PasswordAuthenticator<R> {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthenticatedAdmin, Error> {
        let account = self
            .admins
            .find_by_identifier(&credentials.identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !Self::verify_password(&credentials.password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let role = account
            .role
            .parse::<AdminRole>()
            .map_err(AuthError::UnauthorizedRole)?;

        Ok(AuthenticatedAdmin {
            user_id: account.id,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::services::testing::MockAdminRepository;

    fn authenticator() -> PasswordAuthenticator<MockAdminRepository> {
        PasswordAuthenticator::new(Arc::new(MockAdminRepository::default()))
    }

    #[tokio::test]
    async fn test_login_by_email_or_username() {
        let auth = authenticator();
        let account = auth
            .create_admin("head@studio.test", "head", "password123", AdminRole::HeadAdmin)
            .await
            .unwrap();
        assert_ne!(account.password_hash, "password123");

        let by_email = auth
            .authenticate(&Credentials::new("head@studio.test", "password123"))
            .await
            .unwrap();
        assert_eq!(by_email.user_id, account.id);
        assert_eq!(by_email.role, AdminRole::HeadAdmin);

        let by_username = auth
            .authenticate(&Credentials::new("head", "password123"))
            .await
            .unwrap();
        assert_eq!(by_username, by_email);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let auth = authenticator();
        auth.create_admin("a@studio.test", "staff", "password123", AdminRole::Admin)
            .await
            .unwrap();

        let wrong = auth
            .authenticate(&Credentials::new("staff", "password124"))
            .await
            .unwrap_err();
        let unknown = auth
            .authenticate(&Credentials::new("nobody", "password123"))
            .await
            .unwrap_err();

        assert_eq!(wrong.to_string(), unknown.to_string());
        assert!(matches!(wrong, Error::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_role_is_unauthorized() {
        let repo = Arc::new(MockAdminRepository::default());
        repo.insert_raw(AdminAccount {
            id: UserId::new("adm_legacy"),
            email: "owner@studio.test".to_string(),
            username: "owner".to_string(),
            password_hash: password_auth::generate_hash("password123"),
            role: "Owner".to_string(),
        });

        let auth = PasswordAuthenticator::new(repo);
        let err = auth
            .authenticate(&Credentials::new("owner", "password123"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::UnauthorizedRole(ref r)) if r == "Owner"));
        assert!(!err.counts_as_failure());
    }

    #[tokio::test]
    async fn test_padded_password_signs_in_with_same_input() {
        let auth = authenticator();
        let account = auth
            .create_admin(
                " head@studio.test ",
                " head ",
                " password123 ",
                AdminRole::HeadAdmin,
            )
            .await
            .unwrap();
        assert_eq!(account.email, "head@studio.test");
        assert_eq!(account.username, "head");

        let admin = auth
            .authenticate(&Credentials::new(" head ", " password123 "))
            .await
            .unwrap();
        assert_eq!(admin.user_id, account.id);

        let err = auth
            .create_admin("b@studio.test", "pad", "  short  ", AdminRole::Admin)
            .await
            .unwrap_err();
        assert!(err.is_validation_error());
    }

    #[tokio::test]
    async fn test_create_admin_validates_input() {
        let auth = authenticator();

        let err = auth
            .create_admin("not-an-email", "staff", "password123", AdminRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidEmail(_))
        ));

        let err = auth
            .create_admin("a@studio.test", "staff", "short", AdminRole::Admin)
            .await
            .unwrap_err();
        assert!(err.is_validation_error());
    }
}
