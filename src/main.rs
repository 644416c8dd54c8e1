//! LedgerDesk Server: client portal and admin console API for an accounting firm.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use ledgerdesk_core::config::{AppConfig, LogFormat};
use ledgerdesk_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("LEDGERDESK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting LedgerDesk");

    let db_pool = ledgerdesk_database::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    ledgerdesk_database::migration::run_migrations(db_pool.pool()).await?;

    let store = ledgerdesk_storage::build_object_store(&config.storage).await?;
    tracing::info!(provider = store.provider_type(), "Object store ready");

    let mailer = ledgerdesk_service::mail::build_mailer(&config.mail)?;

    let state = ledgerdesk_api::build_state(config, db_pool.clone(), store, mailer)?;
    let result = ledgerdesk_api::run_server(state).await;

    db_pool.close().await;
    result
}
