use std::sync::OnceLock;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Holds no key material. Tenant secrets are passed in on every token
/// operation, which makes a single instance safe to share between all
/// requests and all tenants.
/// Secret checked against when there is no account, built on first use.
static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl Authenticator {
    /// Create a new authenticator.
    pub fn new() -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored secret.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Run a full verification against a throwaway secret and report a mismatch.
    ///
    /// Lets callers that found no account spend the same time as a real
    /// password check.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let decoy = DECOY_HASH.get_or_init(|| self.password_hasher.hash("decoy").ok());
        if let Some(hash) = decoy {
            let _ = self.password_hasher.verify(password, hash);
        }
        false
    }

    /// Sign a token with the secret of the tenant named in `claims`.
    ///
    /// # Errors
    /// * `EmptySecret` - Tenant has no usable secret
    /// * `EncodingFailed` - Signing failed
    pub fn generate_token(&self, claims: &Claims, secret: &[u8]) -> Result<String, JwtError> {
        self.token_codec.issue(claims, secret)
    }

    /// Read the untrusted tenant id from a token.
    ///
    /// See [`TokenCodec::peek_tenant`].
    pub fn peek_tenant(&self, token: &str) -> Result<i32, JwtError> {
        self.token_codec.peek_tenant(token)
    }

    /// Verify a token against its tenant secret and decode the claims.
    pub fn validate_token(&self, token: &str, secret: &[u8]) -> Result<Claims, JwtError> {
        self.token_codec.verify(token, secret)
    }
}
