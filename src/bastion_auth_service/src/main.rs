use std::sync::Arc;

use axum::http::HeaderValue;
use bastion_adapters::{
    Argon2Hasher, DashMapRefreshSessionStore, HashMapApiKeyStore, HashMapUserStore, JwtConfig,
    JwtTokenSigner, PostgresApiKeyStore, PostgresUserStore, RedisRefreshSessionStore, Settings,
};
use bastion_application::{
    ApiKeyService, AuthenticationService, OperationTable, OtpAuthenticationService, PoliciesGuard,
    PolicyHandlerRegistry, TotpAuthenticator, TotpConfig,
};
use bastion_auth_service::{
    AuthService,
    helpers::{configure_postgresql, configure_redis},
};
use bastion_axum::AppState;
use bastion_core::{ApiKeyStore, RefreshSessionStore, UserStore};
use color_eyre::eyre::{Result, WrapErr};
use secrecy::ExposeSecret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load().wrap_err("Failed to load settings")?;
    let refresh_ttl = u64::try_from(settings.jwt.refresh_token_ttl_in_seconds)
        .wrap_err("Refresh token TTL must not be negative")?;

    match (settings.postgres.clone(), settings.redis.clone()) {
        (Some(postgres), Some(redis)) => {
            let pool = configure_postgresql(postgres.url.expose_secret()).await?;
            let conn = configure_redis(&redis.host_name).await?;
            serve(
                settings,
                PostgresUserStore::new(pool.clone()),
                RedisRefreshSessionStore::new(conn, refresh_ttl),
                PostgresApiKeyStore::new(pool),
            )
            .await
        }
        (Some(postgres), None) => {
            let pool = configure_postgresql(postgres.url.expose_secret()).await?;
            serve(
                settings,
                PostgresUserStore::new(pool.clone()),
                DashMapRefreshSessionStore::default(),
                PostgresApiKeyStore::new(pool),
            )
            .await
        }
        (None, Some(redis)) => {
            let conn = configure_redis(&redis.host_name).await?;
            serve(
                settings,
                HashMapUserStore::default(),
                RedisRefreshSessionStore::new(conn, refresh_ttl),
                HashMapApiKeyStore::default(),
            )
            .await
        }
        (None, None) => {
            tracing::warn!("No PostgreSQL or Redis configured, keeping all state in memory");
            serve(
                settings,
                HashMapUserStore::default(),
                DashMapRefreshSessionStore::default(),
                HashMapApiKeyStore::default(),
            )
            .await
        }
    }
}

async fn serve<U, S, K>(settings: Settings, user_store: U, sessions: S, api_keys: K) -> Result<()>
where
    U: UserStore + Clone + 'static,
    S: RefreshSessionStore + 'static,
    K: ApiKeyStore + 'static,
{
    let totp_config = TotpConfig::try_from(settings.tfa).wrap_err("Invalid TFA settings")?;
    let totp = TotpAuthenticator::new(totp_config);
    let signer = JwtTokenSigner::new(JwtConfig::from(settings.jwt));
    let hasher = Argon2Hasher::default();

    let authentication = AuthenticationService::new(
        user_store.clone(),
        hasher.clone(),
        sessions,
        signer,
        totp.clone(),
    );
    let api_keys = ApiKeyService::new(user_store.clone(), hasher, api_keys);
    let otp = OtpAuthenticationService::new(user_store, totp);

    let registry = PolicyHandlerRegistry::with_default_handlers();
    let table = OperationTable::builder()
        .build(&registry)
        .wrap_err("Invalid policy table")?;
    let guard = PoliciesGuard::new(Arc::new(registry), Arc::new(table));

    let allowed_origins = settings
        .application
        .allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("Invalid CORS origin")?;

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;
    tracing::info!("Starting Bastion authentication service...");

    AuthService::new(AppState::new(authentication, otp, api_keys), guard)
        .run_standalone(listener, allowed_origins)
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
