use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// Error for TenantId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TenantIdError {
    #[error("Tenant ID must be positive, got {0}")]
    NotPositive(i32),
}

/// Error for resolving a tenant's signing secret
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TenantError {
    /// No tenant with this id, or the tenant has no usable secret.
    #[error("Tenant not found: {0}")]
    NotFound(i32),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
