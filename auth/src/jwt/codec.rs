use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TenantClaim;
use super::errors::JwtError;

/// Algorithms accepted on verification. All belong to the HMAC family so a
/// token can never steer verification towards a different key type.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Codec for tenant-scoped identity tokens.
///
/// The codec holds no key material. Every tenant signs with its own secret,
/// which is supplied per call.
/// Reading a token is split in two steps:
///
/// 1. [`TokenCodec::peek_tenant`] reads the tenant id without any verification.
///    The result is untrusted and only good for looking up the tenant secret.
/// 2. [`TokenCodec::verify`] checks the signature with that secret, rejects
///    foreign algorithms and expired tokens, and only then exposes the claims.
#[derive(Debug, Clone, Copy)]
pub struct TokenCodec {
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec that signs with HS256.
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims with a tenant secret.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode
    /// * `secret` - Signing secret of the tenant named by `claims.app_id`
    ///
    /// # Returns
    /// Encoded JWT token string
    ///
    /// # Errors
    /// * `EmptySecret` - The tenant has no usable secret
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: &Claims, secret: &[u8]) -> Result<String, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &EncodingKey::from_secret(secret))
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Read the tenant id from a token without verifying it.
    ///
    /// Neither the signature nor the expiration is checked. Never use the
    /// returned id for anything but selecting the secret to verify with.
    ///
    /// # Errors
    /// * `DecodingFailed` - Token is structurally malformed
    /// * `MissingClaim` - Token carries no (or a zero) `app_id` claim
    pub fn peek_tenant(&self, token: &str) -> Result<i32, JwtError> {
        // The header is skipped entirely, so an unknown `alg` cannot make the peek fail.
        let payload = match token.split('.').collect::<Vec<_>>().as_slice() {
            [_header, payload, _signature] => *payload,
            _ => {
                return Err(JwtError::DecodingFailed(
                    "token must have three segments".to_string(),
                ))
            }
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))?;
        let claim: TenantClaim = serde_json::from_slice(&bytes)
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))?;

        match claim.app_id {
            0 => Err(JwtError::MissingClaim("app_id".to_string())),
            app_id => Ok(app_id),
        }
    }

    /// Verify a token against a tenant secret and return its claims.
    ///
    /// # Errors
    /// * `EmptySecret` - The tenant has no usable secret
    /// * `InvalidAlgorithm` - Token header names a non-HMAC algorithm
    /// * `InvalidSignature` - Token was not signed with `secret`
    /// * `TokenExpired` - `exp` lies in the past
    /// * `DecodingFailed` - Token is malformed or lacks required claims
    pub fn verify(&self, token: &str, secret: &[u8]) -> Result<Claims, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => JwtError::InvalidAlgorithm,
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Verify a token and return only its subject claim.
    pub fn verify_subject(&self, token: &str, secret: &[u8]) -> Result<String, JwtError> {
        self.verify(token, secret).map(|claims| claims.sub)
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}
