use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use latchkey_core::{
    Email, Page, PageRequest, PasswordHash, Role, User, UserId, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres, Row, postgres::PgRow};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, password_hash, enabled, roles, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

fn unexpected(e: impl ToString) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

fn user_from_row(row: &PgRow) -> Result<User, UserStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
    let enabled: bool = row.try_get("enabled").map_err(unexpected)?;
    let roles: Vec<String> = row.try_get("roles").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(unexpected)?;

    let email = Email::try_from(Secret::new(email)).map_err(unexpected)?;
    let roles = roles
        .iter()
        .map(|r| r.parse::<Role>())
        .collect::<Result<BTreeSet<_>, _>>()
        .map_err(unexpected)?;

    Ok(User::from_parts(
        UserId::from(id),
        email,
        PasswordHash::new(Secret::new(password_hash)),
        enabled,
        roles,
        created_at,
        updated_at,
    ))
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.as_ref().map(user_from_row).transpose()
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.as_ref().map(user_from_row).transpose()
    }

    #[tracing::instrument(name = "Checking email in PostgreSQL", skip_all)]
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_ref().expose_secret())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    #[tracing::instrument(name = "Saving user to PostgreSQL", skip_all)]
    async fn save_user(&self, user: User) -> Result<User, UserStoreError> {
        let roles: Vec<String> = user.roles().iter().map(|r| r.as_str().to_owned()).collect();

        let query = sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, enabled, roles, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO UPDATE
                SET email = EXCLUDED.email,
                    password_hash = EXCLUDED.password_hash,
                    enabled = EXCLUDED.enabled,
                    roles = EXCLUDED.roles,
                    updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().as_ref().expose_secret())
        .bind(user.is_enabled())
        .bind(roles)
        .bind(user.created_at())
        .bind(user.updated_at());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        Ok(user)
    }

    #[tracing::instrument(name = "Listing users from PostgreSQL", skip(self))]
    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, UserStoreError> {
        let offset = i64::try_from(page.offset()).map_err(unexpected)?;

        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(page.size()))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;

        let content = rows.iter().map(user_from_row).collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(content, page, total.max(0) as u64))
    }
}
