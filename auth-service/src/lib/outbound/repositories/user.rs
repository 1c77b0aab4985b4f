use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::read_error;
use super::write_error;
use crate::domain::errors::RepositoryError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

const SELECT_USER: &str = r#"
    SELECT id, email, username, slug, hashed_password, created_at, updated_at, last_password_change
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str) -> Result<Option<User>, RepositoryError> {
        let query = format!("{SELECT_USER} WHERE {filter} = $1");
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        row.as_ref().map(user_from_row).transpose()
    }
}

fn user_from_row(row: &PgRow) -> Result<User, RepositoryError> {
    let invalid = |e: sqlx::Error| RepositoryError::InvalidRecord(e.to_string());

    let id: i64 = row.try_get("id").map_err(invalid)?;
    let email: String = row.try_get("email").map_err(invalid)?;
    let username: String = row.try_get("username").map_err(invalid)?;

    Ok(User {
        id: UserId(id),
        email: EmailAddress::new(email)
            .map_err(|e| RepositoryError::InvalidRecord(format!("user {id}: {e}")))?,
        username: Username::new(username)
            .map_err(|e| RepositoryError::InvalidRecord(format!("user {id}: {e}")))?,
        slug: row.try_get("slug").map_err(invalid)?,
        password_hash: row.try_get("hashed_password").map_err(invalid)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(invalid)?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(invalid)?,
        last_password_change: row
            .try_get::<DateTime<Utc>, _>("last_password_change")
            .map_err(invalid)?,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, username, slug, hashed_password, created_at, updated_at, last_password_change)
            VALUES ($1, $2, $3, $4, $5, $5, $5)
            RETURNING id
            "#,
        )
        .bind(user.email.as_str())
        .bind(user.username.as_str())
        .bind(user.username.slug())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(user.into_user(UserId(id)))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let query = format!("{SELECT_USER} WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        self.find_one("email", email.as_str()).await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        self.find_one("username", username.as_str()).await
    }

    async fn patch_username(
        &self,
        user: &User,
        username: &Username,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $1, slug = $2, updated_at = $3
            WHERE id = $4
            "#,
        )
        .bind(username.as_str())
        .bind(username.slug())
        .bind(Utc::now())
        .bind(user.id.0)
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("user {}", user.id)));
        }

        Ok(())
    }

    async fn patch_password(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE users
            SET hashed_password = $1, updated_at = $2, last_password_change = $2
            WHERE id = $3
            "#,
        )
        .bind(password_hash)
        .bind(now)
        .bind(user.id.0)
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("user {}", user.id)));
        }

        Ok(())
    }
}
