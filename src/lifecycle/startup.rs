//! Startup orchestration.
//!
//! # Responsibilities
//! - Load templates and build the repository
//! - Build the selected engine with every route registered
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::CrmConfig;
use crate::customers::repository::shared;
use crate::customers::{InMemoryCustomerRepository, SharedRepository};
use crate::engine::{EngineOptions, Server, ServerError, TemplateStore};
use crate::http::new_server;
use crate::observability::metrics;

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load templates from {dir}: {source}")]
    Templates {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Repository configured by `config`.
pub fn build_repository(config: &CrmConfig) -> SharedRepository {
    if config.repository.seed_sample {
        shared(InMemoryCustomerRepository::seeded())
    } else {
        shared(InMemoryCustomerRepository::new())
    }
}

/// Build the configured server without binding a socket.
pub fn build_server(config: &CrmConfig, repo: SharedRepository) -> Result<Box<dyn Server>, StartupError> {
    let dir = &config.templates.static_dir;
    let templates = TemplateStore::load(Path::new(dir)).map_err(|source| StartupError::Templates {
        dir: dir.clone(),
        source,
    })?;
    tracing::info!(dir = %dir, templates = templates.len(), "Templates loaded");

    let options = EngineOptions {
        templates: Arc::new(templates),
        max_body_bytes: config.limits.max_body_bytes,
    };
    Ok(new_server(repo, config.engine.kind, options))
}

/// Run the backend until Ctrl+C.
pub async fn run(config: CrmConfig) -> Result<(), StartupError> {
    let repo = build_repository(&config);
    let server = build_server(&config, repo)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to install metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    server.listen(config.listener.bind_address.clone()).await?;
    Ok(())
}
