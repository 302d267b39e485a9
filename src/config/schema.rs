//! The recognized service configuration schema.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration consumed by a generated service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Host for the service's HTTP server.
    pub listen_host: String,

    /// Port for the service's HTTP server.
    pub listen_port: u16,

    /// Port for the service's Prometheus metrics server.
    pub metrics_port: u16,

    /// Read timeout for the service's HTTP server, in seconds. Zero disables
    /// the timeout.
    #[serde(rename = "http_read_timeout_sec")]
    pub read_timeout_sec: u64,

    /// Time given to the service to gracefully release resources, in seconds.
    pub graceful_shutdown_timeout_sec: u64,

    /// Where the logger writes: any valid file path, or `stdout`/`stderr`.
    pub paths_to_logs: Vec<String>,

    /// Logging environment: "development", "production", or an explicit
    /// level name (anything unrecognized behaves as production).
    pub log_env: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_host: "localhost".to_string(),
            listen_port: 10001,
            metrics_port: 8081,
            read_timeout_sec: 5,
            graceful_shutdown_timeout_sec: 5,
            paths_to_logs: Vec::new(),
            log_env: "production".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.listen_port)
    }

    pub fn metrics_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.metrics_port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_sec)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.graceful_shutdown_timeout_sec)
    }
}
