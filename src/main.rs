//! ChekUp server binary.
//!
//! Loads configuration from the environment, wires the adapters and serves
//! the REST API until Ctrl-C.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chekup::adapters::auth::StaticTokenValidator;
use chekup::adapters::http::{api_router, AppState, AuthState};
use chekup::adapters::memory::{
    InMemoryBookingRepository, InMemoryInquiryRepository, InMemoryPricingCatalog,
    InMemoryResultStorage,
};
use chekup::adapters::postgres::{
    self, PostgresBookingRepository, PostgresInquiryRepository, PostgresPricingCatalog,
};
use chekup::adapters::storage::FileResultStorage;
use chekup::adapters::{InMemoryEventBus, NotificationLogger};
use chekup::config::{AppConfig, LogFormat, ServerConfig};
use chekup::ports::{EventSubscriber, ResultStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let bus = Arc::new(InMemoryEventBus::dispatch_only());
    bus.subscribe_all(NotificationLogger::EVENT_TYPES, Arc::new(NotificationLogger));

    let results: Arc<dyn ResultStorage> = match config.booking.results_dir() {
        Some(dir) => {
            tracing::info!(dir, "storing result documents on disk");
            Arc::new(FileResultStorage::new(dir))
        }
        None => {
            tracing::warn!("no results directory configured; result documents are kept in memory");
            Arc::new(InMemoryResultStorage::new())
        }
    };

    let state = match config.database.url() {
        Some(url) => {
            let pool = postgres::connect(&config.database, url).await?;
            tracing::info!("connected to PostgreSQL");
            AppState {
                catalog: Arc::new(PostgresPricingCatalog::new(pool.clone())),
                bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
                inquiries: Arc::new(PostgresInquiryRepository::new(pool)),
                results,
                events: bus.clone(),
                settings: config.booking.clone(),
            }
        }
        None => {
            tracing::warn!("no database URL configured; using in-memory adapters with the demo catalog");
            AppState {
                catalog: Arc::new(InMemoryPricingCatalog::demo()),
                bookings: Arc::new(InMemoryBookingRepository::new()),
                inquiries: Arc::new(InMemoryInquiryRepository::new()),
                results,
                events: bus.clone(),
                settings: config.booking.clone(),
            }
        }
    };

    let validator = StaticTokenValidator::from_entries(&config.auth.token_entries()?)?;
    if validator.is_empty() {
        tracing::warn!("no auth tokens configured; only public endpoints are usable");
    }
    let validator: AuthState = Arc::new(validator);

    let app = api_router(state, validator, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "ChekUp listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    match server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init(),
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
    }
}
