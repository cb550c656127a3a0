//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::engine::{EngineKind, DEFAULT_MAX_BODY_BYTES};
use crate::observability::logging::DEFAULT_FILTER;

/// Root configuration for the CRM backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CrmConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Serving engine selection.
    pub engine: EngineConfig,

    /// Customer repository settings.
    pub repository: RepositoryConfig,

    /// Template directory for rendered pages.
    pub templates: TemplateConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which serving library handles requests.
    pub kind: EngineKind,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Start with the sample customer in storage.
    pub seed_sample: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self { seed_sample: true }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding `*.html` templates.
    pub static_dir: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            static_dir: "static".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Metrics listen address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_FILTER.to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9000".to_string(),
        }
    }
}
