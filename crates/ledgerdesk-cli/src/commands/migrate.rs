//! Database migrations.

use anyhow::Context;

use ledgerdesk_core::config::AppConfig;
use ledgerdesk_database::migration::run_migrations;

use crate::output;

/// Apply every pending migration.
pub async fn execute(config: &AppConfig) -> anyhow::Result<()> {
    let pool = super::connect(config).await?;

    println!("Running database migrations...");
    run_migrations(pool.pool())
        .await
        .context("applying migrations")?;
    pool.close().await;

    output::print_success("All migrations applied.");
    Ok(())
}
