//! tablebook CLI - restaurant table reservation server
//!
//! - `serve`: run the HTTP API (PostgreSQL, or in-memory with `--memory`)
//! - `migrate`: create the database schema and exit

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::FileConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tablebook",
    author,
    version,
    about = "Restaurant tables and overlap-checked reservations over HTTP"
)]
struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.tablebook/config.toml when present)
    #[arg(long, global = true, env = "TABLEBOOK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::ServeArgs),

    /// Create the database schema and exit
    Migrate(commands::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    let file = FileConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &file).await?,
        Commands::Migrate(args) => commands::run_migrate(args, &file).await?,
    }
    Ok(())
}
