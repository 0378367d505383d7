//! Server configuration types for imlog.
//!
//! `ServerConfig` represents the `config.toml` in the data directory. Every
//! field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Default upper bound on a page size.
pub const DEFAULT_MAX_PULL_LIMIT: u32 = 1000;

/// Top-level configuration for the imlog server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest page a single Pull may return. Larger limits are clamped.
    #[serde(default = "default_max_pull_limit")]
    pub max_pull_limit: u32,

    /// Include the underlying store/codec cause in failure responses.
    ///
    /// Off by default: callers get a generic message and the cause is logged.
    #[serde(default)]
    pub expose_error_details: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub enable_otel: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_pull_limit() -> u32 {
    DEFAULT_MAX_PULL_LIMIT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_pull_limit: default_max_pull_limit(),
            expose_error_details: false,
            enable_otel: false,
        }
    }
}
