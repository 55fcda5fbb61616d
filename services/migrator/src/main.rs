//! SSO Migrator
//!
//! Applies pending `{version}_{name}.up.sql` files to the SQLite credential
//! store, in version order, one transaction per file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sso_db::{create_pool_with_options, Migrator, PoolOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sso-migrator", version, about = "Apply SSO schema migrations")]
struct Cli {
    /// Path to the SQLite database file (created if missing)
    #[arg(long)]
    storage_path: String,

    /// Directory holding the migration files
    #[arg(long)]
    migrations_path: PathBuf,

    /// Name of the version tracking table
    #[arg(long, default_value = Migrator::DEFAULT_TABLE)]
    migrations_table: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let migrator = Migrator::from_dir(&cli.migrations_path, cli.migrations_table.as_str())
        .with_context(|| format!("loading migrations from {}", cli.migrations_path.display()))?;
    tracing::debug!(count = migrator.migrations().len(), "Loaded migrations");

    // Single connection: migrations are applied serially anyway
    let pool = create_pool_with_options(
        &cli.storage_path,
        PoolOptions::default()
            .with_max_connections(1)
            .with_create_if_missing(true),
    )
    .await
    .with_context(|| format!("opening storage at {}", cli.storage_path))?;

    let report = migrator.run(&pool).await?;
    pool.close().await;

    if report.is_noop() {
        println!("No migrations to apply");
    } else {
        tracing::info!(
            applied = ?report.applied,
            version = ?report.current_version,
            "Migrations applied"
        );
        println!("Migrations applied");
    }

    Ok(())
}
