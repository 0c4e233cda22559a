//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// DirectStay API connection configuration.
    pub api: ApiConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the DirectStay platform API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the DirectStay API.
    pub base_url: String,

    /// Bearer token sent with every API request.
    /// If None, requests are sent unauthenticated.
    pub token: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://directstaynow.com".to_string(),
            token: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "ds-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            api: ApiConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// `sse` selects the push transport; it comes from the command line
    /// rather than the environment. Token resolution prefers the legacy
    /// `DS_TOKEN` variable over `DIRECT_STAY_API_KEY` so existing
    /// deployments keep working.
    pub fn from_env(sse: bool) -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("DS_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(token) = std::env::var("DS_TOKEN") {
            config.api.token = Some(token);
            info!("Using legacy DS_TOKEN for API authentication");
        } else if let Ok(token) = std::env::var("DIRECT_STAY_API_KEY") {
            config.api.token = Some(token);
        } else {
            warn!(
                "No DirectStay API token configured - requests will be sent \
                 unauthenticated. Set DIRECT_STAY_API_KEY."
            );
        }

        if let Ok(level) = std::env::var("DS_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env(sse);

        config
    }
}
