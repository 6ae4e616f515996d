use color_eyre::eyre::{Result, WrapErr};
use latchkey_adapters::{
    HashMapRecoveryTokenStore, HashMapUserStore, JwtTokenCodec, LatchkeySettings, LoggingNotifier,
    PostgresRecoveryTokenStore, PostgresUserStore,
};
use latchkey_axum::AppState;
use latchkey_core::{Notifier, RecoveryTokenStore, UserStore};
use latchkey_service::{
    AuthService,
    helpers::{configure_email_client, configure_postgresql},
    telemetry::init_tracing,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = LatchkeySettings::load().wrap_err("Failed to load configuration")?;

    match configure_postgresql(&settings.database).await? {
        Some(pool) => {
            tracing::info!("Using PostgreSQL stores");
            with_notifier(
                settings,
                PostgresUserStore::new(pool.clone()),
                PostgresRecoveryTokenStore::new(pool),
            )
            .await
        }
        None => {
            tracing::warn!("No database configured, using in-memory stores");
            with_notifier(
                settings,
                HashMapUserStore::new(),
                HashMapRecoveryTokenStore::new(),
            )
            .await
        }
    }
}

async fn with_notifier<U, T>(settings: LatchkeySettings, user_store: U, token_store: T) -> Result<()>
where
    U: UserStore + Clone + 'static,
    T: RecoveryTokenStore + Clone + 'static,
{
    match &settings.email_client {
        Some(email_client) => {
            let notifier = configure_email_client(email_client)?;
            serve(settings, user_store, token_store, notifier).await
        }
        None => {
            tracing::warn!("No email client configured, notifications are only logged");
            serve(settings, user_store, token_store, LoggingNotifier).await
        }
    }
}

async fn serve<U, T, N>(
    settings: LatchkeySettings,
    user_store: U,
    token_store: T,
    notifier: N,
) -> Result<()>
where
    U: UserStore + Clone + 'static,
    T: RecoveryTokenStore + Clone + 'static,
    N: Notifier + 'static,
{
    let state = AppState::new(
        user_store,
        token_store,
        notifier,
        JwtTokenCodec::new(settings.jwt_config()),
        settings.link_settings(),
    );
    let auth_service = AuthService::new(state, &settings.application.api_prefix);

    let address = settings.application.address();
    let listener = TcpListener::bind(&address)
        .await
        .wrap_err_with(|| format!("Failed to bind {address}"))?;

    auth_service
        .run_standalone(listener, Some(settings.application.allowed_origins.clone()))
        .await?;

    Ok(())
}
