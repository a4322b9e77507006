//! Metrics collection and exposition.
//!
//! # Metrics
//! - `demo_http_requests_total` (counter): API requests by route, status
//! - `demo_node_probe_total` (counter): node probes by outcome
//! - `demo_node_height` (gauge): last block height reported by the node
//!
//! Without an installed recorder every call is a no-op, so the service and
//! its tests record unconditionally.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Outcome label of a node probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    Failure,
}

impl ProbeOutcome {
    fn as_str(self) -> &'static str {
        match self {
            ProbeOutcome::Success => "success",
            ProbeOutcome::Failure => "failure",
        }
    }
}

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(route: &'static str, status: u16) {
    metrics::counter!(
        "demo_http_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_probe(outcome: ProbeOutcome) {
    metrics::counter!("demo_node_probe_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_node_height(height: u64) {
    metrics::gauge!("demo_node_height").set(height as f64);
}
