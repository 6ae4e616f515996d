use chrono::{DateTime, Utc};
use latchkey_core::{
    RecoveryToken, RecoveryTokenId, RecoveryTokenStore, RecoveryTokenStoreError,
    RecoveryTokenValue, TokenPurpose, UserId,
};
use secrecy::ExposeSecret;
use sqlx::{Pool, Postgres, Row, postgres::PgRow};
use uuid::Uuid;

const TOKEN_COLUMNS: &str = "id, purpose, value, user_id, expires_at, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresRecoveryTokenStore {
    pool: sqlx::PgPool,
}

impl PostgresRecoveryTokenStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresRecoveryTokenStore { pool }
    }
}

fn unexpected(e: impl ToString) -> RecoveryTokenStoreError {
    RecoveryTokenStoreError::UnexpectedError(e.to_string())
}

fn token_from_row(row: &PgRow) -> Result<RecoveryToken, RecoveryTokenStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let purpose: String = row.try_get("purpose").map_err(unexpected)?;
    let value: String = row.try_get("value").map_err(unexpected)?;
    let user_id: Uuid = row.try_get("user_id").map_err(unexpected)?;
    let expires_at: DateTime<Utc> = row.try_get("expires_at").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(unexpected)?;

    Ok(RecoveryToken::from_parts(
        RecoveryTokenId::from(id),
        purpose.parse::<TokenPurpose>().map_err(unexpected)?,
        RecoveryTokenValue::from(value),
        UserId::from(user_id),
        expires_at,
        created_at,
        updated_at,
    ))
}

#[async_trait::async_trait]
impl RecoveryTokenStore for PostgresRecoveryTokenStore {
    #[tracing::instrument(name = "Retrieving recovery token by value", skip(self, value))]
    async fn find_by_value(
        &self,
        purpose: TokenPurpose,
        value: &RecoveryTokenValue,
    ) -> Result<Option<RecoveryToken>, RecoveryTokenStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {TOKEN_COLUMNS} FROM recovery_tokens WHERE purpose = $1 AND value = $2"
        ))
        .bind(purpose.as_str())
        .bind(value.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.as_ref().map(token_from_row).transpose()
    }

    #[tracing::instrument(name = "Retrieving recovery token by user", skip(self))]
    async fn find_by_user(
        &self,
        purpose: TokenPurpose,
        user_id: &UserId,
    ) -> Result<Option<RecoveryToken>, RecoveryTokenStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {TOKEN_COLUMNS} FROM recovery_tokens WHERE purpose = $1 AND user_id = $2"
        ))
        .bind(purpose.as_str())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.as_ref().map(token_from_row).transpose()
    }

    #[tracing::instrument(name = "Saving recovery token", skip_all)]
    async fn save_token(
        &self,
        token: RecoveryToken,
    ) -> Result<RecoveryToken, RecoveryTokenStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO recovery_tokens (id, purpose, value, user_id, expires_at, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO UPDATE
                SET value = EXCLUDED.value,
                    expires_at = EXCLUDED.expires_at,
                    updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(token.id().as_uuid())
        .bind(token.purpose().as_str())
        .bind(token.value().as_ref().expose_secret())
        .bind(token.user_id().as_uuid())
        .bind(token.expires_at())
        .bind(token.created_at())
        .bind(token.updated_at());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return RecoveryTokenStoreError::DuplicateToken;
                }
            }
            unexpected(e)
        })?;

        Ok(token)
    }

    #[tracing::instrument(name = "Deleting recovery token", skip(self))]
    async fn delete_token(
        &self,
        purpose: TokenPurpose,
        id: &RecoveryTokenId,
    ) -> Result<(), RecoveryTokenStoreError> {
        sqlx::query("DELETE FROM recovery_tokens WHERE purpose = $1 AND id = $2")
            .bind(purpose.as_str())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(())
    }
}
