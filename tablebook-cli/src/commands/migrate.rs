//! Schema setup command

use anyhow::{Context, Result};
use clap::Parser;
use tablebook_server::db::{create_pool, migrations};

use crate::config::FileConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create the tables and indexes, then exit
pub async fn run_migrate(args: MigrateArgs, file: &FileConfig) -> Result<()> {
    let database_url = args
        .database_url
        .or_else(|| file.database_url.clone())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or config.toml")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
