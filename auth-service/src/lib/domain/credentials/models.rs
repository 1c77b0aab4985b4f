use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::credentials::errors::TokenError;
use crate::domain::tenant::models::TenantId;
use crate::user::models::EmailAddress;
use crate::user::models::Password;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::models::Username;

/// Bearer token as received from a caller.
///
/// Only the compact-JWS shape is checked here. Whether the token is genuine is
/// decided by the credential service. `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// # Errors
    /// * `Empty` - Token is blank
    /// * `Malformed` - Token does not have three dot-separated segments
    pub fn new(token: String) -> Result<Self, TokenError> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        let segments: Vec<&str> = token.split('.').collect();
        match segments.as_slice() {
            [header, payload, _signature] if !header.is_empty() && !payload.is_empty() => {
                Ok(Self(token))
            }
            _ => Err(TokenError::Malformed),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Command to register a new user
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub username: Username,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, username: Username, password: Password) -> Self {
        Self {
            email,
            username,
            password,
        }
    }
}

/// Command to sign in to a tenant
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub tenant_id: TenantId,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: Password, tenant_id: TenantId) -> Self {
        Self {
            email,
            password,
            tenant_id,
        }
    }
}

#[derive(Debug)]
pub struct ChangeUsernameCommand {
    pub token: AccessToken,
    pub username: Username,
}

impl ChangeUsernameCommand {
    pub fn new(token: AccessToken, username: Username) -> Self {
        Self { token, username }
    }
}

#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub token: AccessToken,
    pub password: Password,
}

impl ChangePasswordCommand {
    pub fn new(token: AccessToken, password: Password) -> Self {
        Self { token, password }
    }
}

#[derive(Debug)]
pub struct ResetPasswordCommand {
    pub email: EmailAddress,
}

impl ResetPasswordCommand {
    pub fn new(email: EmailAddress) -> Self {
        Self { email }
    }
}

/// Public projection of a user, returned by `me`. Never carries the password secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: UserId,
    pub email: EmailAddress,
    pub username: Username,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_password_change: DateTime<Utc>,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            slug: user.slug,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_password_change: user.last_password_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_shape() {
        assert!(AccessToken::new("aaa.bbb.ccc".to_string()).is_ok());
        assert!(AccessToken::new(" aaa.bbb.ccc \n".to_string()).is_ok());
        assert_eq!(AccessToken::new(String::new()), Err(TokenError::Empty));
        assert_eq!(AccessToken::new("   ".to_string()), Err(TokenError::Empty));
        assert_eq!(
            AccessToken::new("aaa.bbb".to_string()),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            AccessToken::new(".bbb.ccc".to_string()),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            AccessToken::new("a.b.c.d".to_string()),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("header.payload.signature".to_string()).unwrap();
        assert!(!format!("{token:?}").contains("payload"));
    }
}
