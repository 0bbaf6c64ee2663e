//! Memberdesk API server
//!
//! Loads configuration, picks the storage and gateway adapters, starts the
//! expiry reconciler and serves the HTTP API until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::EnvFilter;

use memberdesk::adapters::http::{app_router, AppState};
use memberdesk::adapters::postgres::{
    self, PostgresMemberRepository, PostgresOperatorDirectory, PostgresPaymentLedger,
    PostgresPlanRepository,
};
use memberdesk::adapters::{
    HttpGatewayConfig, HttpPaymentGateway, InMemoryStore, JwtSessionValidator, MockPaymentGateway,
    ReconcileScheduler, ReconcileSchedulerConfig, SystemClock,
};
use memberdesk::application::{ExpiryReconciler, SeedDefaultPlansHandler};
use memberdesk::config::{AppConfig, LogFormat, ServerConfig};
use memberdesk::domain::membership::ResetFromNow;
use memberdesk::domain::payment::GatewaySignatureVerifier;
use memberdesk::ports::{
    Clock, MemberRepository, OperatorDirectory, PaymentGateway, PaymentLedger, PlanRepository,
};

struct Stores {
    members: Arc<dyn MemberRepository>,
    plans: Arc<dyn PlanRepository>,
    ledger: Arc<dyn PaymentLedger>,
    operators: Arc<dyn OperatorDirectory>,
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match server.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn open_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    let Some(url) = config.database.url() else {
        tracing::warn!("No database configured, using in-memory storage; data is lost on restart");
        let store = Arc::new(InMemoryStore::new());
        return Ok(Stores {
            members: store.clone(),
            plans: store.clone(),
            ledger: store.clone(),
            operators: store,
        });
    };

    tracing::info!("Connecting to database...");
    let pool = postgres::connect(
        url,
        config.database.max_connections,
        config.database.acquire_timeout(),
    )
    .await
    .context("connecting to database")?;

    if config.database.run_migrations {
        postgres::run_migrations(&pool)
            .await
            .context("running migrations")?;
        tracing::info!("Migrations applied");
    }

    Ok(Stores {
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        plans: Arc::new(PostgresPlanRepository::new(pool.clone())),
        ledger: Arc::new(PostgresPaymentLedger::new(pool.clone())),
        operators: Arc::new(PostgresOperatorDirectory::new(pool)),
    })
}

fn open_gateway(config: &AppConfig) -> anyhow::Result<Arc<dyn PaymentGateway>> {
    let payment = &config.payment;
    match (&payment.key_id, &payment.key_secret) {
        (Some(key_id), Some(key_secret)) if payment.has_credentials() => {
            let gateway = HttpPaymentGateway::new(
                HttpGatewayConfig::new(key_id.clone(), key_secret.clone())
                    .with_base_url(payment.api_base_url.clone())
                    .with_timeout(payment.timeout()),
            )
            .context("building payment gateway client")?;
            tracing::info!(base_url = %payment.api_base_url, "Payment gateway configured");
            Ok(Arc::new(gateway))
        }
        _ => {
            tracing::warn!(
                "No gateway credentials configured, using mock payment gateway; \
                 payment signatures are checked against the public mock secret"
            );
            Ok(Arc::new(MockPaymentGateway::new()))
        }
    }
}

async fn shutdown_signal(shutdown: watch::Sender<bool>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
    let _ = shutdown.send(true);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.server);
    config.validate().context("validating configuration")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting memberdesk"
    );

    let stores = open_stores(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let seeded = SeedDefaultPlansHandler::new(stores.plans.clone(), clock.clone())
        .handle()
        .await
        .context("seeding default plans")?;
    if seeded > 0 {
        tracing::info!(count = seeded, "Seeded default plans");
    }

    let jwt_secret = config
        .auth
        .jwt_secret
        .as_ref()
        .context("AUTH__JWT_SECRET is required")?;
    let validator = Arc::new(JwtSessionValidator::new(
        jwt_secret,
        config.auth.issuer.as_deref(),
        config.auth.audience.as_deref(),
    ));

    let state = AppState {
        members: stores.members.clone(),
        plans: stores.plans,
        ledger: stores.ledger,
        operators: stores.operators,
        gateway: open_gateway(&config)?,
        clock: clock.clone(),
        renewal: Arc::new(ResetFromNow),
        verifier: Arc::new(GatewaySignatureVerifier::new(config.payment.signing_secret())),
        admin_emails: Arc::new(config.auth.admin_emails_list()),
        currency: config.payment.currency.clone(),
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = ReconcileScheduler::new(
        Arc::new(ExpiryReconciler::new(stores.members, clock)),
        ReconcileSchedulerConfig::default()
            .with_interval(config.reconciler.interval())
            .with_run_on_startup(config.reconciler.run_on_startup),
    );
    let scheduler_task = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    let cors_origins = config.server.cors_origins_list();
    let app = app_router(state, validator, &cors_origins)
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    match scheduler_task.await {
        Ok(sweeps) => tracing::info!(sweeps, "Reconciler stopped"),
        Err(e) => tracing::error!(error = %e, "Reconciler task failed"),
    }

    Ok(())
}
