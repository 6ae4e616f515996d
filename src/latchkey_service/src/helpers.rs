use color_eyre::eyre::{Result, WrapErr};
use latchkey_adapters::{
    PostmarkEmailClient,
    config::{DatabaseSettings, EmailClientSettings},
    persistence::{get_postgres_pool, run_migrations},
};
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use sqlx::PgPool;

/// Connect to PostgreSQL and apply pending migrations.
///
/// Returns `None` when no database URL is configured.
pub async fn configure_postgresql(settings: &DatabaseSettings) -> Result<Option<PgPool>> {
    let Some(url) = &settings.url else {
        return Ok(None);
    };

    let pool = get_postgres_pool(url.expose_secret(), settings.max_connections)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;

    run_migrations(&pool)
        .await
        .wrap_err("Failed to run migrations")?;

    Ok(Some(pool))
}

/// Build the Postmark client described by `settings`.
pub fn configure_email_client(settings: &EmailClientSettings) -> Result<PostmarkEmailClient> {
    let http_client = HttpClient::builder()
        .timeout(settings.timeout())
        .build()
        .wrap_err("Failed to build HTTP client")?;

    Ok(PostmarkEmailClient::new(
        settings.base_url.clone(),
        settings.sender()?,
        settings.auth_token.clone(),
        http_client,
    ))
}
