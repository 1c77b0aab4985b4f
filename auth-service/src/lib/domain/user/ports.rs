use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Returns
    /// Stored user with its assigned identifier
    ///
    /// # Errors
    /// * `UniqueViolation` - Email, username or slug is already taken
    /// * `Database` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Retrieve user by (lower-cased) email address.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<User>, RepositoryError>;

    /// Replace the username, recompute the slug and stamp `updated_at`.
    ///
    /// # Errors
    /// * `UniqueViolation` - New username or slug is already taken
    /// * `NotFound` - User does not exist anymore
    /// * `Database` - Database operation failed
    async fn patch_username(&self, user: &User, username: &Username)
        -> Result<(), RepositoryError>;

    /// Replace the password secret and stamp `updated_at` and `last_password_change`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist anymore
    /// * `Database` - Database operation failed
    async fn patch_password(&self, user: &User, password_hash: &str)
        -> Result<(), RepositoryError>;
}
