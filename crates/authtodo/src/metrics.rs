//! Prometheus metrics for the auth and todo services.
//!
//! The recorder is installed once at startup and rendered by `GET /metrics`.
//! Until it is installed every `record_*` call is a no-op.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub mod names {
    pub const REQUESTS_TOTAL: &str = "authtodo_requests_total";
    pub const REQUEST_DURATION_SECONDS: &str = "authtodo_request_duration_seconds";

    pub const CACHE_HITS_TOTAL: &str = "authtodo_cache_hits_total";
    pub const CACHE_MISSES_TOTAL: &str = "authtodo_cache_misses_total";

    pub const RATE_LIMITED_TOTAL: &str = "authtodo_rate_limited_total";
}

/// Install the Prometheus recorder.
///
/// Returns `false` if a recorder was already installed or installation failed.
pub fn init_metrics() -> bool {
    if PROMETHEUS_HANDLE.get().is_some() {
        tracing::debug!("Prometheus metrics already initialized");
        return false;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROMETHEUS_HANDLE.set(handle).is_err() {
                tracing::warn!("Failed to store Prometheus handle (already set)");
                return false;
            }

            tracing::info!("Prometheus metrics initialized");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Prometheus recorder");
            false
        }
    }
}

/// Render all metrics in Prometheus text format, if initialized.
pub fn render_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}

/// Record one service call and how long it took.
pub fn record_service_call(service: &'static str, method: &'static str, duration: Duration) {
    counter!(names::REQUESTS_TOTAL, "service" => service, "method" => method).increment(1);
    histogram!(names::REQUEST_DURATION_SECONDS, "service" => service, "method" => method)
        .record(duration.as_secs_f64());
}

pub fn record_cache_hit() {
    counter!(names::CACHE_HITS_TOTAL).increment(1);
}

pub fn record_cache_miss() {
    counter!(names::CACHE_MISSES_TOTAL).increment(1);
}

pub fn record_rate_limited() {
    counter!(names::RATE_LIMITED_TOTAL).increment(1);
}
