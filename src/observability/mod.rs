//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Engines and handlers produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (request counters, latency histograms)
//!
//! Consumers:
//!     → stdout via tracing-subscriber fmt layer
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Log level from `RUST_LOG`, falling back to the configured filter
//! - Metrics go through the `metrics` facade; without an installed
//!   recorder they are no-ops

pub mod logging;
pub mod metrics;
