//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    Stdio,

    /// Server-Sent Events transport with JSON-RPC over POST.
    Sse(SseConfig),
}

/// SSE transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SseConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Stdio
    }
}

impl Default for SseConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: default_host(),
            enable_cors: default_cors(),
        }
    }
}

impl SseConfig {
    /// Load SSE settings from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);
        let host = std::env::var("DS_SSE_HOST").unwrap_or_else(|_| default_host());
        let enable_cors = std::env::var("DS_SSE_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);
        Self {
            port,
            host,
            enable_cors,
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an SSE transport config.
    pub fn sse(port: u16, host: impl Into<String>) -> Self {
        Self::Sse(SseConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Select the transport from the command-line flag.
    ///
    /// SSE settings (port, host, CORS) come from the environment; without
    /// the flag the server speaks MCP over STDIO.
    pub fn from_env(sse: bool) -> Self {
        if sse {
            Self::Sse(SseConfig::from_env())
        } else {
            Self::Stdio
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            Self::Sse(cfg) => format!("SSE on {}:{}", cfg.host, cfg.port),
        }
    }
}
