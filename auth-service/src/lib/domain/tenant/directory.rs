use std::sync::Arc;

use crate::domain::tenant::errors::TenantError;
use crate::domain::tenant::models::Tenant;
use crate::domain::tenant::models::TenantId;
use crate::domain::tenant::ports::TenantRepository;

/// Resolves tenant ids to tenants that are able to sign and verify tokens.
pub struct TenantDirectory<TR>
where
    TR: TenantRepository,
{
    repository: Arc<TR>,
}

impl<TR> TenantDirectory<TR>
where
    TR: TenantRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    /// Look up a tenant by id.
    ///
    /// A tenant whose secret is empty is reported exactly like a missing one.
    ///
    /// # Errors
    /// * `NotFound` - Unknown tenant, or tenant without a secret
    /// * `Repository` - Storage failure
    pub async fn resolve(&self, id: &TenantId) -> Result<Tenant, TenantError> {
        match self.repository.find_by_id(id).await? {
            Some(tenant) if tenant.has_secret() => Ok(tenant),
            Some(_) => {
                tracing::warn!(tenant_id = %id, "Tenant has no signing secret");
                Err(TenantError::NotFound(id.value()))
            }
            None => Err(TenantError::NotFound(id.value())),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::domain::errors::RepositoryError;

    mock! {
        pub TestTenantRepository {}

        #[async_trait]
        impl TenantRepository for TestTenantRepository {
            async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError>;
        }
    }

    fn tenant(secret: &[u8]) -> Tenant {
        Tenant {
            id: TenantId::new(1).unwrap(),
            name: "web".to_string(),
            secret: secret.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut repository = MockTestTenantRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(tenant(b"s1"))));

        let directory = TenantDirectory::new(Arc::new(repository));
        let resolved = directory.resolve(&TenantId::new(1).unwrap()).await;

        assert_eq!(resolved, Ok(tenant(b"s1")));
    }

    #[tokio::test]
    async fn test_resolve_empty_secret_is_not_found() {
        let mut repository = MockTestTenantRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(tenant(b""))));

        let directory = TenantDirectory::new(Arc::new(repository));
        let resolved = directory.resolve(&TenantId::new(1).unwrap()).await;

        assert_eq!(resolved, Err(TenantError::NotFound(1)));
    }

    #[tokio::test]
    async fn test_resolve_missing_tenant() {
        let mut repository = MockTestTenantRepository::new();
        repository.expect_find_by_id().times(1).returning(|_| Ok(None));

        let directory = TenantDirectory::new(Arc::new(repository));
        let resolved = directory.resolve(&TenantId::new(2).unwrap()).await;

        assert_eq!(resolved, Err(TenantError::NotFound(2)));
    }

    #[tokio::test]
    async fn test_resolve_storage_failure() {
        let mut repository = MockTestTenantRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(RepositoryError::Database("connection reset".to_string())));

        let directory = TenantDirectory::new(Arc::new(repository));
        let resolved = directory.resolve(&TenantId::new(1).unwrap()).await;

        assert!(matches!(resolved, Err(TenantError::Repository(_))));
    }
}
