//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the front door.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the front door.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FrontDoorConfig {
    /// Identity, mount point and response header settings.
    pub server: ServerConfig,

    /// Static asset directories exposed under a URL prefix.
    pub static_mounts: Vec<StaticMountConfig>,

    /// XSRF header requirement for unsafe methods.
    pub xsrf: XsrfConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Server identity and URL layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Application name, sent back in the `kbn-name` header.
    pub name: String,

    /// Application version, compared against the `kbn-version` request header.
    pub version: String,

    /// Bind address (e.g., "0.0.0.0:5601").
    pub bind_address: String,

    /// Virtual prefix the application is mounted under ("" or "/prefix").
    pub base_path: String,

    /// Where `GET /` lands, relative to the base path.
    pub default_route: String,

    /// Extra headers added to every response.
    /// Ordered by name so the injected set is deterministic.
    pub custom_response_headers: BTreeMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "kibana".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            bind_address: "0.0.0.0:5601".to_string(),
            base_path: String::new(),
            default_route: "/app/kibana".to_string(),
            custom_response_headers: BTreeMap::new(),
        }
    }
}

/// A URL prefix bound to a directory on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticMountConfig {
    /// URL prefix without trailing slash (e.g., "/ui").
    pub url_prefix: String,

    /// Directory served under the prefix.
    pub directory: String,
}

/// XSRF protection settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct XsrfConfig {
    /// Skip the header requirement entirely.
    pub disable_protection: bool,

    /// Base-relative paths exempt from the header requirement.
    pub whitelist: Vec<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl Default for FrontDoorConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            static_mounts: vec![StaticMountConfig {
                url_prefix: "/ui".to_string(),
                directory: "ui/public/assets".to_string(),
            }],
            xsrf: XsrfConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
