//! Metrics collection and exposition.
//!
//! # Metrics
//! - `crm_requests_total` (counter): requests by engine, method, status
//! - `crm_request_duration_seconds` (histogram): handler latency by engine

use std::net::SocketAddr;
use std::time::Instant;

use hyper::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(engine: &'static str, method: &Method, status: u16, start: Instant) {
    metrics::counter!(
        "crm_requests_total",
        "engine" => engine,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("crm_request_duration_seconds", "engine" => engine)
        .record(start.elapsed().as_secs_f64());
}
