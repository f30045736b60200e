//! Metrics collection and exposition.
//!
//! # Metrics
//! - `front_door_responses_total` (counter): responses by kind (success/failure) and status
//! - `front_door_redirects_total` (counter): redirects by kind (canonical/default_route)
//! - `front_door_rejections_total` (counter): pre-dispatch rejections by check (version/xsrf)

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_response(failure: bool, status: u16) {
    let kind = if failure { "failure" } else { "success" };
    ::metrics::counter!(
        "front_door_responses_total",
        "kind" => kind,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_redirect(kind: &'static str) {
    ::metrics::counter!("front_door_redirects_total", "kind" => kind).increment(1);
}

pub fn record_rejection(check: &'static str) {
    ::metrics::counter!("front_door_rejections_total", "check" => check).increment(1);
}
