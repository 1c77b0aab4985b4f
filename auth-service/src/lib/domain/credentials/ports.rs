use async_trait::async_trait;

use crate::domain::credentials::errors::CredentialError;
use crate::domain::credentials::models::AccessToken;
use crate::domain::credentials::models::ChangePasswordCommand;
use crate::domain::credentials::models::ChangeUsernameCommand;
use crate::domain::credentials::models::LoginCommand;
use crate::domain::credentials::models::Profile;
use crate::domain::credentials::models::RegisterCommand;
use crate::domain::credentials::models::ResetPasswordCommand;
use crate::domain::credentials::notification::Notification;
use crate::domain::errors::NotifierError;

/// Port for credential operations, consumed by the transport layer.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Errors
    /// * `UserExists` - Email or username is already taken
    /// * `Internal` - Hashing or storage failed
    async fn register(&self, command: RegisterCommand) -> Result<bool, CredentialError>;

    /// Verify a password and issue a token scoped to the requested tenant.
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or unusable tenant
    /// * `Internal` - Storage or token encoding failed
    async fn login(&self, command: LoginCommand) -> Result<String, CredentialError>;

    /// Change the username of the token's subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Token cannot be verified
    /// * `UserExists` - Username is already taken
    /// * `NotFoundInternal` - Subject of a verified token no longer exists
    /// * `Internal` - Storage failed
    async fn change_username(&self, command: ChangeUsernameCommand)
        -> Result<bool, CredentialError>;

    /// Change the password of the token's subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Token cannot be verified
    /// * `NotFoundInternal` - Subject of a verified token no longer exists
    /// * `Internal` - Hashing or storage failed
    async fn change_password(&self, command: ChangePasswordCommand)
        -> Result<bool, CredentialError>;

    /// Replace the password with a random one and mail it to the user.
    ///
    /// The generated password is never returned.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email
    /// * `Internal` - Hashing or storage failed
    async fn reset_password(&self, command: ResetPasswordCommand)
        -> Result<bool, CredentialError>;

    /// Return the profile of the token's subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Token cannot be verified
    /// * `NotFoundInternal` - Subject of a verified token no longer exists
    /// * `Internal` - Storage failed
    async fn me(&self, token: AccessToken) -> Result<Profile, CredentialError>;
}

/// Outbound message sink (mail delivery).
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Hand a notification over for delivery.
    ///
    /// # Errors
    /// * `SerializationFailed` - Notification could not be encoded
    /// * `PublishFailed` - Broker rejected the message
    /// * `ConnectionFailed` - Broker unreachable
    async fn enqueue(&self, notification: Notification) -> Result<(), NotifierError>;
}
