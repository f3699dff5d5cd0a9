//! regalo - gift voucher payment webhook service.
//!
//! Binds the webhook router over the real adapters: PostgreSQL voucher
//! store, Mercado Pago payment lookups, and Resend email delivery.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use regalo::adapters::http::{webhook_router, WebhookAppState};
use regalo::adapters::{
    DisabledMailer, MercadoPagoClient, MercadoPagoConfig, PostgresVoucherStore, ResendConfig,
    ResendMailer,
};
use regalo::config::AppConfig;
use regalo::domain::webhook::WebhookSignatureVerifier;
use regalo::ports::{PaymentGateway, VoucherMailer, VoucherStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config);

    info!(
        environment = ?config.server.environment,
        gateway_test_mode = config.gateway.is_test_mode(),
        signature_verification = config.gateway.verifies_signatures(),
        email_enabled = config.email.enabled,
        "Starting regalo webhook service"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.connect_timeout())
        .connect(&config.database.url)
        .await
        .context("failed to connect to PostgreSQL")?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run database migrations")?;
        info!("Database migrations applied");
    }

    let state = build_state(&config, pool);

    let app = axum::Router::new()
        .nest("/webhooks", webhook_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Listening for webhook deliveries");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured filter applies.
/// Production deployments emit JSON lines for log aggregation.
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    if config.server.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Wire the configured adapters into the shared webhook state.
fn build_state(config: &AppConfig, pool: PgPool) -> WebhookAppState {
    let verifier = Arc::new(WebhookSignatureVerifier::new(
        config.gateway.webhook_secret.clone(),
    ));

    let gateway: Arc<dyn PaymentGateway> = Arc::new(MercadoPagoClient::new(
        MercadoPagoConfig::new(config.gateway.access_token.clone())
            .with_base_url(config.gateway.base_url.clone()),
    ));

    let store: Arc<dyn VoucherStore> = Arc::new(PostgresVoucherStore::new(pool));

    let mailer: Arc<dyn VoucherMailer> = if config.email.enabled {
        Arc::new(ResendMailer::new(
            ResendConfig::new(config.email.resend_api_key.clone(), config.email.from_header())
                .with_base_url(config.email.base_url.clone()),
        ))
    } else {
        info!("Email dispatch disabled; confirmation emails will be skipped");
        Arc::new(DisabledMailer)
    };

    WebhookAppState {
        verifier,
        gateway,
        store,
        mailer,
    }
}
