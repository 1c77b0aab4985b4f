use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a tenant-scoped identity token.
///
/// The `app_id` claim names the tenant whose secret signed the token. It is
/// readable before verification, everything else is only trusted once the
/// signature has been checked against that tenant's secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Tenant (application) identifier
    pub app_id: i32,

    /// Username at issuance time
    pub username: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a user signing in to a tenant.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username snapshot embedded in the token
    /// * `app_id` - Tenant the token is scoped to
    /// * `ttl` - Time until the token expires
    pub fn for_user(
        user_id: impl ToString,
        username: impl Into<String>,
        app_id: i32,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: user_id.to_string(),
            app_id,
            username: username.into(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }
}

/// The single claim that may be read from an unverified token.
#[derive(Debug, Deserialize)]
pub(crate) struct TenantClaim {
    #[serde(default)]
    pub app_id: i32,
}
