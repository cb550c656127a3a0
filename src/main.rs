//! CRM backend (v1)
//!
//! A customer CRUD API served by axum or a bare hyper loop.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 CRM BACKEND                   │
//!                        │                                               │
//!     Client Request     │  ┌──────────────┐        ┌───────────────┐   │
//!     ───────────────────┼─▶│    engine    │───────▶│     http      │   │
//!                        │  │ axum | hyper │        │   handlers    │   │
//!                        │  └──────┬───────┘        └───────┬───────┘   │
//!                        │         │ HttpEngine             │           │
//!                        │         │                        ▼           │
//!     Client Response    │         │                ┌───────────────┐   │
//!     ◀──────────────────┼─────────┘                │   customers   │   │
//!                        │                          │  repository   │   │
//!                        │                          └───────────────┘   │
//!                        │                                               │
//!                        │  ┌──────────┐ ┌───────────────┐ ┌──────────┐ │
//!                        │  │  config  │ │ observability │ │lifecycle │ │
//!                        │  └──────────┘ └───────────────┘ └──────────┘ │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use crm_backend::config::{load_config, validate_config, ConfigError, CrmConfig};
use crm_backend::engine::EngineKind;
use crm_backend::lifecycle::startup;
use crm_backend::observability::logging;

#[derive(Parser)]
#[command(name = "crm-backend")]
#[command(about = "Customer CRUD API over a pluggable HTTP engine", long_about = None)]
struct Cli {
    /// Serving engine to bind.
    #[arg(short, long, value_enum)]
    server: Option<EngineKind>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the configuration.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CrmConfig::default(),
    };
    if let Some(kind) = cli.server {
        config.engine.kind = kind;
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_tracing(&config.observability.log_filter);

    tracing::info!("crm-backend v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        engine = %config.engine.kind,
        bind_address = %config.listener.bind_address,
        seed_sample = config.repository.seed_sample,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
