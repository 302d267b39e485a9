//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by path
//! - `http_requests_duration_seconds` (histogram): request latency by path
//! - `http_response_status_codes_total` (counter): status codes by path
//!
//! # Design Decisions
//! - The registry is constructed explicitly at startup and handed to the
//!   exposition server, not reached through process-global statics
//! - Recording goes through the `metrics` facade, so tests can isolate with
//!   a local recorder

pub mod middleware;
pub mod server;

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUESTS_DURATION_SECONDS: &str = "http_requests_duration_seconds";
pub const HTTP_RESPONSE_STATUS_CODES_TOTAL: &str = "http_response_status_codes_total";

/// Error type for registry installation.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("a metrics recorder is already installed in this process")]
    AlreadyInstalled,
}

/// Handle to the Prometheus registry backing the recorder.
///
/// Cloning is cheap; clones render the same registry.
#[derive(Clone)]
pub struct MetricsRegistry {
    handle: PrometheusHandle,
}

impl MetricsRegistry {
    /// Build the Prometheus recorder, install it as the process recorder,
    /// and describe the request metrics.
    pub fn install() -> Result<MetricsRegistry, MetricsError> {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::set_global_recorder(recorder).map_err(|_| MetricsError::AlreadyInstalled)?;

        describe_counter!(HTTP_REQUESTS_TOTAL, "Number of HTTP requests.");
        describe_histogram!(HTTP_REQUESTS_DURATION_SECONDS, "Duration of HTTP requests.");
        describe_counter!(
            HTTP_RESPONSE_STATUS_CODES_TOTAL,
            "Number of response status codes for path."
        );

        Ok(MetricsRegistry { handle })
    }

    /// Render the registry in the Prometheus exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Record one handled request across all three series.
pub fn record_request(path: &str, status: u16, started: Instant) {
    counter!(HTTP_REQUESTS_TOTAL, "path" => path.to_string()).increment(1);
    histogram!(HTTP_REQUESTS_DURATION_SECONDS, "path" => path.to_string())
        .record(started.elapsed().as_secs_f64());
    counter!(
        HTTP_RESPONSE_STATUS_CODES_TOTAL,
        "path" => path.to_string(),
        "code" => status.to_string()
    )
    .increment(1);
}
