use tonic::Status;

use crate::credentials::errors::CredentialError;
use crate::credentials::errors::ValidationError;
use crate::credentials::models::Profile;

pub mod change_password;
pub mod change_username;
pub mod login;
pub mod me;
pub mod register;
pub mod reset_password;

/// Message sent for every failure that must not be described to the caller.
const INTERNAL_ERROR_MESSAGE: &str = "internal error";

impl From<CredentialError> for Status {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Validation(_) => Status::invalid_argument(err.to_string()),
            CredentialError::InvalidCredentials | CredentialError::InvalidToken => {
                Status::unauthenticated(err.to_string())
            }
            CredentialError::UserExists => Status::already_exists(err.to_string()),
            CredentialError::NotFoundInternal(_) | CredentialError::Internal(_) => {
                tracing::error!(error = %err, "Request failed");
                Status::internal(INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl From<ValidationError> for Status {
    fn from(err: ValidationError) -> Self {
        Status::invalid_argument(err.to_string())
    }
}

impl From<&Profile> for crate::proto::User {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.0,
            email: profile.email.as_str().to_string(),
            username: profile.username.as_str().to_string(),
            slug: profile.slug.clone(),
            created_at: profile.created_at.to_rfc3339(),
            updated_at: profile.updated_at.to_rfc3339(),
            last_password_change: profile.last_password_change.to_rfc3339(),
        }
    }
}
