//! HTTP server command

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tablebook_server::db::{create_pool_with_options, migrations, pool::DEFAULT_MAX_CONNECTIONS};
use tablebook_server::{run_server, MemoryStore, PgStore, ServerConfig, Store};

use crate::config::FileConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "TABLEBOOK_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections (default: 5)
    #[arg(long, env = "TABLEBOOK_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Request timeout in seconds (default: 30)
    #[arg(long, env = "TABLEBOOK_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Return `[]` instead of 404 when a listing has no rows
    #[arg(long)]
    pub empty_lists_ok: bool,

    /// Keep everything in memory instead of PostgreSQL (data is lost on exit)
    #[arg(long)]
    pub memory: bool,
}

/// Fully resolved serve settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServeSettings {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub memory: bool,
    pub server: ServerConfig,
}

impl ServeArgs {
    /// Merge flags/env over the config file over defaults.
    pub fn resolve(self, file: &FileConfig) -> ServeSettings {
        let defaults = ServerConfig::default();

        ServeSettings {
            database_url: self.database_url.or_else(|| file.database_url.clone()),
            max_connections: self
                .max_connections
                .or(file.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            memory: self.memory,
            server: ServerConfig {
                bind_addr: self.bind.or(file.bind).unwrap_or(defaults.bind_addr),
                cors_permissive: self.cors_permissive
                    || file.cors_permissive.unwrap_or(defaults.cors_permissive),
                request_timeout: self
                    .timeout
                    .or(file.timeout_secs)
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.request_timeout),
                empty_list_not_found: if self.empty_lists_ok {
                    false
                } else {
                    file.empty_list_not_found
                        .unwrap_or(defaults.empty_list_not_found)
                },
            },
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, file: &FileConfig) -> Result<()> {
    let settings = args.resolve(file);

    let store: Arc<dyn Store> = if settings.memory {
        tracing::warn!("Using in-memory store; data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let database_url = settings.database_url.as_deref().context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or config.toml (or pass --memory)",
        )?;

        let pool = create_pool_with_options(database_url, settings.max_connections)
            .await
            .context("Failed to create database pool")?;

        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;

        Arc::new(PgStore::new(pool))
    };

    tracing::info!("Starting tablebook server on {}", settings.server.bind_addr);

    // Run server (blocks until shutdown)
    run_server(store, settings.server)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags_or_file() {
        let settings = ServeArgs::default().resolve(&FileConfig::default());
        assert_eq!(settings.database_url, None);
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(settings.server.bind_addr.port(), 3030);
        assert_eq!(settings.server.request_timeout, Duration::from_secs(30));
        assert!(settings.server.empty_list_not_found);
        assert!(!settings.server.cors_permissive);
    }

    #[test]
    fn file_fills_missing_flags() {
        let file = FileConfig {
            database_url: Some("postgres://file/db".into()),
            bind: Some("0.0.0.0:9000".parse().unwrap()),
            max_connections: Some(20),
            timeout_secs: Some(3),
            cors_permissive: Some(true),
            empty_list_not_found: Some(false),
        };

        let settings = ServeArgs::default().resolve(&file);
        assert_eq!(settings.database_url.as_deref(), Some("postgres://file/db"));
        assert_eq!(settings.max_connections, 20);
        assert_eq!(settings.server.bind_addr.port(), 9000);
        assert_eq!(settings.server.request_timeout, Duration::from_secs(3));
        assert!(settings.server.cors_permissive);
        assert!(!settings.server.empty_list_not_found);
    }

    #[test]
    fn flags_beat_file() {
        let file = FileConfig {
            database_url: Some("postgres://file/db".into()),
            max_connections: Some(20),
            ..FileConfig::default()
        };
        let args = ServeArgs {
            database_url: Some("postgres://flag/db".into()),
            max_connections: Some(2),
            empty_lists_ok: true,
            ..ServeArgs::default()
        };

        let settings = args.resolve(&file);
        assert_eq!(settings.database_url.as_deref(), Some("postgres://flag/db"));
        assert_eq!(settings.max_connections, 2);
        assert!(!settings.server.empty_list_not_found);
    }

    #[test]
    fn parses_flags() {
        let args = ServeArgs::try_parse_from([
            "serve",
            "--bind",
            "127.0.0.1:4000",
            "--timeout",
            "10",
            "--memory",
        ])
        .unwrap();
        assert_eq!(args.bind.unwrap().port(), 4000);
        assert_eq!(args.timeout, Some(10));
        assert!(args.memory);
    }
}
