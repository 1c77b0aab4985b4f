use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::JwtError;
use chrono::Duration;

use crate::domain::credentials::errors::CredentialError;
use crate::domain::credentials::models::AccessToken;
use crate::domain::credentials::models::ChangePasswordCommand;
use crate::domain::credentials::models::ChangeUsernameCommand;
use crate::domain::credentials::models::LoginCommand;
use crate::domain::credentials::models::Profile;
use crate::domain::credentials::models::RegisterCommand;
use crate::domain::credentials::models::ResetPasswordCommand;
use crate::domain::credentials::notification::Notification;
use crate::domain::credentials::password::generate_password;
use crate::domain::credentials::ports::CredentialServicePort;
use crate::domain::credentials::ports::Notifier;
use crate::domain::errors::RepositoryError;
use crate::domain::tenant::directory::TenantDirectory;
use crate::domain::tenant::errors::TenantError;
use crate::domain::tenant::models::TenantId;
use crate::domain::tenant::ports::TenantRepository;
use crate::user::models::NewUser;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for credential operations.
///
/// Holds only shared handles to its collaborators and the token TTL, so a
/// single instance serves any number of concurrent requests.
pub struct CredentialService<UR, TR, N>
where
    UR: UserRepository,
    TR: TenantRepository,
    N: Notifier,
{
    users: Arc<UR>,
    tenants: TenantDirectory<TR>,
    notifier: Arc<N>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<UR, TR, N> CredentialService<UR, TR, N>
where
    UR: UserRepository,
    TR: TenantRepository,
    N: Notifier,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `tenants` - Tenant persistence implementation
    /// * `notifier` - Outbound mail sink
    /// * `authenticator` - Password hashing and token codec
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(
        users: Arc<UR>,
        tenants: Arc<TR>,
        notifier: Arc<N>,
        authenticator: Arc<Authenticator>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            tenants: TenantDirectory::new(tenants),
            notifier,
            authenticator,
            token_ttl,
        }
    }

    /// Recover the user behind a token.
    ///
    /// The tenant id is read unverified and only used to fetch the secret the
    /// token must have been signed with. Nothing else in the token is looked at
    /// before the signature checks out.
    async fn authenticated_user(
        &self,
        op: &'static str,
        token: &AccessToken,
    ) -> Result<User, CredentialError> {
        let tenant_id = self
            .authenticator
            .peek_tenant(token.as_str())
            .map_err(|e| {
                tracing::warn!(op, error = %e, "Failed to read app id from token");
                CredentialError::InvalidToken
            })
            .and_then(|id| {
                TenantId::new(id).map_err(|e| {
                    tracing::warn!(op, error = %e, "Token carries an invalid app id");
                    CredentialError::InvalidToken
                })
            })?;

        let tenant = self
            .tenants
            .resolve(&tenant_id)
            .await
            .map_err(|e| match e {
                TenantError::NotFound(_) => {
                    tracing::warn!(op, tenant_id = %tenant_id, "Token names an unusable app");
                    CredentialError::InvalidToken
                }
                TenantError::Repository(e) => internal(op, e),
            })?;

        let subject = self
            .authenticator
            .validate_token(token.as_str(), &tenant.secret)
            .map(|claims| claims.sub)
            .map_err(|e| {
                tracing::warn!(op, tenant_id = %tenant_id, error = %e, "Token verification failed");
                CredentialError::InvalidToken
            })?;

        let user_id = UserId::from_string(&subject).map_err(|e| {
            tracing::warn!(op, tenant_id = %tenant_id, error = %e, "Token subject is not a user id");
            CredentialError::InvalidToken
        })?;

        self.users
            .find_by_id(&user_id)
            .await
            .map_err(|e| internal(op, e))?
            .ok_or_else(|| {
                tracing::error!(op, user_id = %user_id, "User of a verified token does not exist");
                CredentialError::NotFoundInternal(format!("{op}: user {user_id}"))
            })
    }

    /// Hash on the blocking pool so Argon2 never stalls the async workers.
    async fn hash_password(
        &self,
        op: &'static str,
        password: &str,
    ) -> Result<String, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| internal(op, e))?
            .map_err(|e| {
                tracing::error!(op, error = %e, "Failed to hash password");
                internal(op, e)
            })
    }

    /// Check a password on the blocking pool.
    ///
    /// Without a stored hash the check runs against a decoy, so an unknown
    /// account costs as much as a wrong password.
    async fn verify_password(
        &self,
        op: &'static str,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<bool, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_owned();
        let stored_hash = stored_hash.map(str::to_owned);

        tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => authenticator.verify_password(&password, &hash),
            None => authenticator.verify_decoy(&password),
        })
        .await
        .map_err(|e| internal(op, e))
    }

    /// Hand a notification to the notifier without waiting for it.
    fn dispatch(&self, notification: Notification) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            let recipient = notification.recipient.clone();
            if let Err(e) = notifier.enqueue(notification).await {
                tracing::error!(recipient = %recipient, error = %e, "Failed to dispatch notification");
            }
        });
    }
}

#[async_trait]
impl<UR, TR, N> CredentialServicePort for CredentialService<UR, TR, N>
where
    UR: UserRepository,
    TR: TenantRepository,
    N: Notifier,
{
    async fn register(&self, command: RegisterCommand) -> Result<bool, CredentialError> {
        const OP: &str = "credentials.register";
        tracing::info!(op = OP, email = %command.email, username = %command.username, "Register user");

        let password_hash = self.hash_password(OP, command.password.as_str()).await?;
        let new_user = NewUser::new(command.email, command.username, password_hash);

        match self.users.create(new_user).await {
            Ok(user) => {
                tracing::info!(op = OP, user_id = %user.id, "User registered");
                Ok(true)
            }
            Err(RepositoryError::UniqueViolation(constraint)) => {
                tracing::info!(op = OP, constraint = %constraint, "User already exists");
                Err(CredentialError::UserExists)
            }
            Err(e) => {
                tracing::error!(op = OP, error = %e, "Failed to save user");
                Err(internal(OP, e))
            }
        }
    }

    async fn login(&self, command: LoginCommand) -> Result<String, CredentialError> {
        const OP: &str = "credentials.login";
        tracing::info!(op = OP, email = %command.email, tenant_id = %command.tenant_id, "Login user");

        let user = self
            .users
            .find_by_email(&command.email)
            .await
            .map_err(|e| {
                tracing::error!(op = OP, error = %e, "Failed to get user");
                internal(OP, e)
            })?;

        let stored_hash = user.as_ref().map(|user| user.password_hash.as_str());
        let verified = self
            .verify_password(OP, command.password.as_str(), stored_hash)
            .await?;

        let user = match user {
            Some(user) if verified => user,
            Some(user) => {
                tracing::info!(op = OP, user_id = %user.id, "Password mismatch");
                return Err(CredentialError::InvalidCredentials);
            }
            None => {
                tracing::info!(op = OP, "Unknown email");
                return Err(CredentialError::InvalidCredentials);
            }
        };

        let tenant = self
            .tenants
            .resolve(&command.tenant_id)
            .await
            .map_err(|e| match e {
                TenantError::NotFound(_) => {
                    tracing::info!(op = OP, tenant_id = %command.tenant_id, "Unusable app");
                    CredentialError::InvalidCredentials
                }
                TenantError::Repository(e) => internal(OP, e),
            })?;

        let claims = Claims::for_user(
            user.id,
            user.username.as_str(),
            tenant.id.value(),
            self.token_ttl,
        );

        let token = self
            .authenticator
            .generate_token(&claims, &tenant.secret)
            .map_err(|e| match e {
                JwtError::EmptySecret => CredentialError::InvalidCredentials,
                other => {
                    tracing::error!(op = OP, error = %other, "Failed to create token");
                    internal(OP, other)
                }
            })?;

        tracing::info!(op = OP, user_id = %user.id, tenant_id = %tenant.id, "Token issued");
        Ok(token)
    }

    async fn change_username(
        &self,
        command: ChangeUsernameCommand,
    ) -> Result<bool, CredentialError> {
        const OP: &str = "credentials.change_username";
        tracing::info!(op = OP, "Change username");

        let user = self.authenticated_user(OP, &command.token).await?;

        self.users
            .patch_username(&user, &command.username)
            .await
            .map_err(|e| match e {
                RepositoryError::UniqueViolation(constraint) => {
                    tracing::info!(op = OP, constraint = %constraint, "Username already taken");
                    CredentialError::UserExists
                }
                RepositoryError::NotFound(_) => {
                    CredentialError::NotFoundInternal(format!("{OP}: user {}", user.id))
                }
                other => {
                    tracing::error!(op = OP, error = %other, "Failed to patch username");
                    internal(OP, other)
                }
            })?;

        tracing::info!(op = OP, user_id = %user.id, username = %command.username, "Username changed");
        Ok(true)
    }

    async fn change_password(
        &self,
        command: ChangePasswordCommand,
    ) -> Result<bool, CredentialError> {
        const OP: &str = "credentials.change_password";
        tracing::info!(op = OP, "Change password");

        let user = self.authenticated_user(OP, &command.token).await?;
        let password_hash = self.hash_password(OP, command.password.as_str()).await?;

        self.users
            .patch_password(&user, &password_hash)
            .await
            .map_err(|e| patch_password_error(OP, &user, e))?;

        tracing::info!(op = OP, user_id = %user.id, "Password changed");
        Ok(true)
    }

    async fn reset_password(
        &self,
        command: ResetPasswordCommand,
    ) -> Result<bool, CredentialError> {
        const OP: &str = "credentials.reset_password";
        tracing::info!(op = OP, email = %command.email, "Reset password");

        let user = self
            .users
            .find_by_email(&command.email)
            .await
            .map_err(|e| {
                tracing::error!(op = OP, error = %e, "Failed to get user");
                internal(OP, e)
            })?;

        // Hash before looking at the result so an unknown email costs the same.
        let password = generate_password();
        let password_hash = self.hash_password(OP, &password).await?;

        let Some(user) = user else {
            tracing::info!(op = OP, "Unknown email");
            return Err(CredentialError::InvalidCredentials);
        };

        self.users
            .patch_password(&user, &password_hash)
            .await
            .map_err(|e| patch_password_error(OP, &user, e))?;

        self.dispatch(Notification::password_reset(user.email.as_str(), &password));

        tracing::info!(op = OP, user_id = %user.id, "Password reset");
        Ok(true)
    }

    async fn me(&self, token: AccessToken) -> Result<Profile, CredentialError> {
        const OP: &str = "credentials.me";
        tracing::info!(op = OP, "Get me");

        self.authenticated_user(OP, &token).await.map(Profile::from)
    }
}

fn internal(op: &str, err: impl fmt::Display) -> CredentialError {
    CredentialError::Internal(format!("{op}: {err}"))
}

fn patch_password_error(op: &'static str, user: &User, err: RepositoryError) -> CredentialError {
    match err {
        RepositoryError::NotFound(_) => {
            CredentialError::NotFoundInternal(format!("{op}: user {}", user.id))
        }
        other => {
            tracing::error!(op, error = %other, "Failed to patch password");
            internal(op, other)
        }
    }
}
