//! Credential primitives for the authentication service
//!
//! - Password hashing (Argon2id)
//! - Tenant-scoped JWT issuing, tenant peeking, and verification
//! - A shared `Authenticator` facade over both
//!
//! Tokens are signed with the secret of the tenant (application) they are
//! issued for, so no key material lives in this crate. Callers look up the
//! secret themselves, usually after peeking the tenant id out of the token.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tenant-scoped tokens
//! ```
//! use auth::{Claims, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new();
//! let claims = Claims::for_user(42, "alice", 1, Duration::hours(1));
//! let token = codec.issue(&claims, b"tenant-one-secret").unwrap();
//!
//! // The tenant id is readable before verification...
//! let tenant_id = codec.peek_tenant(&token).unwrap();
//! assert_eq!(tenant_id, 1);
//!
//! // ...but the subject only comes out of a verified token.
//! let subject = codec.verify_subject(&token, b"tenant-one-secret").unwrap();
//! assert_eq!(subject, "42");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
