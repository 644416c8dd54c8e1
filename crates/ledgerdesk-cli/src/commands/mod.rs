//! CLI command definitions and dispatch.

pub mod admin;
pub mod config;
pub mod migrate;

use anyhow::Context;
use clap::{Parser, Subcommand};

use ledgerdesk_core::config::AppConfig;
use ledgerdesk_database::DatabasePool;

/// LedgerDesk administration
#[derive(Debug, Parser)]
#[command(name = "ledgerdesk", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and per-environment overrides
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment name, selects `{config_dir}/{env}.toml`
    #[arg(long, env = "LEDGERDESK_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create an administrator account
    CreateAdmin(admin::CreateAdminArgs),
    /// Load and validate the configuration, then print a summary
    CheckConfig,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        let config = AppConfig::load_from_dir(&self.config_dir, &self.env)
            .with_context(|| format!("loading configuration for '{}'", self.env))?;

        match &self.command {
            Commands::Migrate => migrate::execute(&config).await,
            Commands::CreateAdmin(args) => admin::execute(args, &config).await,
            Commands::CheckConfig => config::execute(&config),
        }
    }
}

/// Connect to the configured database.
pub async fn connect(config: &AppConfig) -> anyhow::Result<DatabasePool> {
    DatabasePool::connect(&config.database)
        .await
        .context("connecting to the database")
}
