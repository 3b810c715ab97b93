//! Config file loading
//!
//! Precedence, highest first: command-line flag, environment variable
//! (handled by clap), config file, built-in default.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Contents of `config.toml`; every key is optional.
///
/// ```toml
/// database_url = "postgres://localhost/tablebook"
/// bind = "0.0.0.0:3030"
/// max_connections = 10
/// timeout_secs = 15
/// cors_permissive = false
/// empty_list_not_found = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub database_url: Option<String>,
    pub bind: Option<SocketAddr>,
    pub max_connections: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub cors_permissive: Option<bool>,
    pub empty_list_not_found: Option<bool>,
}

impl FileConfig {
    /// Default location: ~/.tablebook/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tablebook").join("config.toml"))
    }

    /// Load an explicit path (must exist), else the default path if present,
    /// else an empty config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))?;

        tracing::debug!(path = %path.display(), "config file loaded");
        Ok(config)
    }
}
