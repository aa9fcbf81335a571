use thiserror::Error;

use crate::storage::LockStatus;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication failed: {reason} ({status})")]
    AuthenticationFailed { reason: String, status: LockStatus },

    #[error("Lockout active: {0}")]
    LockoutActive(LockStatus),

    #[error("Unauthorized role: {0}")]
    UnauthorizedRole(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Record not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Malformed persisted state: {0}")]
    MalformedState(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl Error {
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// True when the attempt was rejected by the local lockout, without
    /// consulting the authenticator.
    pub fn is_lockout(&self) -> bool {
        matches!(self, Error::Auth(AuthError::LockoutActive(_)))
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Storage(StorageError::NotFound))
    }
}
