//! Metrics collection and exposition.
//!
//! # Metrics
//! - `greeter_requests_total` (counter): requests by service, route, status
//! - `greeter_request_duration_seconds` (histogram): handler latency
//! - `greeter_upstream_failures_total` (counter): failed time lookups by kind
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder, so handlers call these helpers unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "greeter_requests_total";
pub const REQUEST_DURATION: &str = "greeter_request_duration_seconds";
pub const UPSTREAM_FAILURES: &str = "greeter_upstream_failures_total";

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(service: &'static str, route: &'static str, status: u16, start: Instant) {
    counter!(
        REQUESTS_TOTAL,
        "service" => service,
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(REQUEST_DURATION, "service" => service, "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a failed call to the time service.
pub fn record_upstream_failure(kind: &'static str) {
    counter!(UPSTREAM_FAILURES, "kind" => kind).increment(1);
}
