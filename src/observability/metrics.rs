//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_router_decisions_total` (counter): decisions by kind and mode
//! - `locale_router_redirects_total` (counter): redirects by status
//! - `locale_router_misses_total` (counter): not-found decisions by reason
//! - `locale_router_endpoint_hits_total` (counter): endpoints served before routing
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Labels are static strings; paths never become labels

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::decision::RoutingDecision;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one routing decision. `mode` is `serve`, `dev` or `build`.
pub fn record_decision(decision: &RoutingDecision, mode: &'static str) {
    ::metrics::counter!(
        "locale_router_decisions_total",
        "kind" => decision.kind(),
        "mode" => mode
    )
    .increment(1);

    match decision {
        RoutingDecision::Redirect { status, .. } => {
            ::metrics::counter!("locale_router_redirects_total", "status" => status.to_string())
                .increment(1);
        }
        RoutingDecision::NotFound { reason } => {
            ::metrics::counter!("locale_router_misses_total", "reason" => reason.as_str())
                .increment(1);
        }
        RoutingDecision::Serve { .. } => {}
    }
}

pub fn record_endpoint_hit(mode: &'static str) {
    ::metrics::counter!("locale_router_endpoint_hits_total", "mode" => mode).increment(1);
}
