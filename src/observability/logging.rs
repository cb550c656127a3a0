//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Resolve the filter from `RUST_LOG` or configuration

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor configuration set one.
pub const DEFAULT_FILTER: &str = "crm_backend=debug,tower_http=debug";

/// Install the global subscriber. Later calls are ignored.
pub fn init_tracing(config_filter: &str) {
    let fallback = if config_filter.trim().is_empty() {
        DEFAULT_FILTER
    } else {
        config_filter
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
