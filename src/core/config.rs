//! Configuration management for the MCP server.
//!
//! Everything is read from the environment (optionally seeded from a `.env`
//! file). The Holded API key is the only mandatory setting; it is checked
//! when the server is built, not when the configuration is loaded.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::holded::DEFAULT_BASE_URL;
use tracing::{info, warn};

/// Environment variable holding the Holded API key.
pub const API_KEY_ENV: &str = "HOLDED_API_KEY";

/// Default timeout for one outbound Holded call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Holded API connection settings.
    pub holded: HoldedConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default)]
pub struct CredentialsConfig {
    /// Holded API key, sent as the `key` header on every call.
    pub holded_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "holded_api_key",
                &self.holded_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CredentialsConfig {
    /// The Holded API key, or a configuration error if it is missing or empty.
    pub fn api_key(&self) -> Result<&str> {
        match self.holded_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(Error::config(format!(
                "{API_KEY_ENV} environment variable is required"
            ))),
        }
    }
}

/// Holded API connection settings.
#[derive(Debug, Clone)]
pub struct HoldedConfig {
    /// API base URL; paths like `invoicing/v1/contacts` are resolved below it.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HoldedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "holded-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            holded: HoldedConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, ...); Holded settings use `HOLDED_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            config.credentials.holded_api_key = Some(api_key);
            info!("Holded API key loaded from environment");
        }

        if let Ok(base_url) = std::env::var("HOLDED_BASE_URL") {
            info!("Using Holded base URL {}", base_url);
            config.holded.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("HOLDED_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.holded.timeout_secs = secs,
                Err(_) => warn!(
                    "Invalid HOLDED_TIMEOUT_SECS '{}', using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    /// Configuration with the given key and defaults for everything else.
    #[cfg(test)]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.credentials.holded_api_key = Some(api_key.into());
        config
    }
}
