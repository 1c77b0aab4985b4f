use thiserror::Error;

use crate::domain::tenant::errors::TenantIdError;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordError;
use crate::user::errors::UsernameError;

/// Error for access token shape validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is empty")]
    Empty,

    #[error("Token is not a compact JWS (expected header.payload.signature)")]
    Malformed,
}

/// Field-level input errors, raised before any domain logic runs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),

    #[error("Invalid token: {0}")]
    Token(#[from] TokenError),

    #[error("Invalid app id: {0}")]
    TenantId(#[from] TenantIdError),
}

/// Top-level error for all credential operations.
///
/// `InvalidCredentials` and `InvalidToken` are deliberately coarse: callers
/// must not learn whether an account exists or which token check failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User already exists")]
    UserExists,

    /// A record referenced by a verified token has disappeared.
    #[error("Record not found: {0}")]
    NotFoundInternal(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
