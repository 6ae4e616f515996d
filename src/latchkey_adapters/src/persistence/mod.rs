pub mod hashmap_recovery_token_store;
pub mod hashmap_user_store;
pub mod postgres_recovery_token_store;
pub mod postgres_user_store;

pub use hashmap_recovery_token_store::HashMapRecoveryTokenStore;
pub use hashmap_user_store::HashMapUserStore;
pub use postgres_recovery_token_store::PostgresRecoveryTokenStore;
pub use postgres_user_store::PostgresUserStore;

use sqlx::{PgPool, postgres::PgPoolOptions};

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Apply the bundled schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../latchkey_service/migrations").run(pool).await
}
