use thiserror::Error;

/// Error for storage operations shared by every repository port.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write. Carries the constraint name.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    /// A stored row no longer satisfies the domain invariants.
    #[error("Stored record is invalid: {0}")]
    InvalidRecord(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Error for notification dispatch.
///
/// Never surfaced to callers of the credential operations; dispatch is best effort.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Failed to serialize notification: {0}")]
    SerializationFailed(String),

    #[error("Failed to publish notification to broker: {0}")]
    PublishFailed(String),

    #[error("Connection to notification broker failed: {0}")]
    ConnectionFailed(String),
}
