use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use super::read_error;
use crate::domain::errors::RepositoryError;
use crate::domain::tenant::models::Tenant;
use crate::domain::tenant::models::TenantId;
use crate::domain::tenant::ports::TenantRepository;

pub struct PostgresTenantRepository {
    pool: PgPool,
}

impl PostgresTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for PostgresTenantRepository {
    async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, secret
            FROM tenants
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let invalid = |e: sqlx::Error| RepositoryError::InvalidRecord(e.to_string());
        let raw_id: i32 = row.try_get("id").map_err(invalid)?;
        let secret: String = row.try_get("secret").map_err(invalid)?;

        Ok(Some(Tenant {
            id: TenantId::new(raw_id)
                .map_err(|e| RepositoryError::InvalidRecord(e.to_string()))?,
            name: row.try_get("name").map_err(invalid)?,
            secret: secret.into_bytes(),
        }))
    }
}
