//! Environment configuration

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use tracing::info;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8098";
const DEFAULT_DATABASE_PATH: &str = "./roster.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_path: String,
    /// Prefix for rendered links, always starting and ending with `/`
    pub base_path: String,
    pub storage: StorageKind,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment...");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_address = var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address: SocketAddr = bind_address
            .parse()
            .with_context(|| format!("Failed to parse bind address: {}", bind_address))?;

        let database_path =
            var("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        let base_path = normalize_base_path(var("BASE_PATH").as_deref().unwrap_or("/"));

        let storage = match var("ROSTER_STORAGE").as_deref().map(str::trim) {
            None | Some("sqlite") => StorageKind::Sqlite,
            Some("memory") => StorageKind::Memory,
            Some(other) => bail!("Unknown ROSTER_STORAGE '{}', expected 'sqlite' or 'memory'", other),
        };

        Ok(Self {
            bind_address,
            database_path,
            base_path,
            storage,
        })
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
