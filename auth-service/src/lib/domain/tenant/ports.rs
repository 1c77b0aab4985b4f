use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::tenant::models::Tenant;
use crate::domain::tenant::models::TenantId;

/// Read access to tenants (applications). Tenants are administered out of band.
#[async_trait]
pub trait TenantRepository: Send + Sync + 'static {
    /// Retrieve tenant by identifier.
    ///
    /// # Returns
    /// Optional tenant (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError>;
}
