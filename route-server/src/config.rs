//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::domain::RailwayId;
use crate::network::LineSpec;

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Network document to serve
    pub network_file: PathBuf,

    /// Railway wrapping the document's top-level edges, for line artifacts
    pub line: Option<LineSpec>,

    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// Graph cache settings
    pub cache: CacheConfig,

    /// How often to re-read the network document, if at all
    pub reload_interval: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network_file: PathBuf::from("data/network.json"),
            line: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cache: CacheConfig::default(),
            reload_interval: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// - `NETWORK_FILE`: network document path
    /// - `NETWORK_LINE_ID`, `NETWORK_LINE_NAME`, `NETWORK_LINE_NAME_ENGLISH`:
    ///   load a line artifact as a single railway
    /// - `BIND_ADDR`: listen address
    /// - `GRAPH_CACHE_TTL_SECS`: lifetime of cached graphs
    /// - `NETWORK_RELOAD_SECS`: re-read the document periodically
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("NETWORK_FILE") {
            config.network_file = PathBuf::from(path);
        }

        if let Some(value) = lookup("BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|e| ConfigError {
                var: "BIND_ADDR",
                reason: format!("{e}"),
                value,
            })?;
        }

        if let Some(secs) = seconds(&lookup, "GRAPH_CACHE_TTL_SECS")? {
            config.cache = config.cache.with_ttl(secs);
        }

        config.reload_interval = seconds(&lookup, "NETWORK_RELOAD_SECS")?.filter(|d| !d.is_zero());

        if let Some(value) = lookup("NETWORK_LINE_ID") {
            let id = RailwayId::parse(&value).map_err(|e| ConfigError {
                var: "NETWORK_LINE_ID",
                reason: e.to_string(),
                value: value.clone(),
            })?;
            let name_local = lookup("NETWORK_LINE_NAME").unwrap_or_else(|| value.clone());
            let name_english = lookup("NETWORK_LINE_NAME_ENGLISH").unwrap_or(value);
            config.line = Some(LineSpec::new(id, name_local, name_english));
        }

        Ok(config)
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let secs: u64 = value.parse().map_err(|e| ConfigError {
        var,
        reason: format!("{e}"),
        value,
    })?;
    Ok(Some(Duration::from_secs(secs)))
}
