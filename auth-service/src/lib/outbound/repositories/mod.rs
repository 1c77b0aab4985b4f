pub mod tenant;
pub mod user;

pub use tenant::PostgresTenantRepository;
pub use user::PostgresUserRepository;

use crate::domain::errors::RepositoryError;

/// Translate a failed write, keeping the name of a violated unique constraint.
pub(crate) fn write_error(err: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return RepositoryError::UniqueViolation(constraint.to_string());
        }
    }
    RepositoryError::Database(err.to_string())
}

pub(crate) fn read_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(err.to_string())
}
