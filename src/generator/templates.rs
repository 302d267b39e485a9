//! The fixed set of emitted files.
//!
//! Placeholders: `{{ project_name }}` and `{{ repo_path }}`.

/// One emitted file: where it lands relative to the project root, and its
/// template text.
pub struct Element {
    pub path: &'static str,
    pub template: &'static str,
}

pub const ELEMENTS: &[Element] = &[
    Element {
        path: "README.md",
        template: README,
    },
    Element {
        path: ".gitignore",
        template: GITIGNORE,
    },
    Element {
        path: "Makefile",
        template: MAKEFILE,
    },
    Element {
        path: "Cargo.toml",
        template: MANIFEST,
    },
    Element {
        path: "config.json",
        template: CONFIG_JSON,
    },
    Element {
        path: "src/config.rs",
        template: CONFIG_RS,
    },
    Element {
        path: "src/handler.rs",
        template: HANDLER_RS,
    },
    Element {
        path: "src/metrics.rs",
        template: METRICS_RS,
    },
    Element {
        path: "src/main.rs",
        template: MAIN_RS,
    },
];

const README: &str = r##"# {{ project_name }}
Generated from scaffold

To run service:
```shell
make build
make test-run
```
To test service:
```shell
curl -d '' localhost:10001/
curl -d 'text=some text here to repeat' localhost:10001/repeat
curl -H 'Content-Type: application/json' -d '{"text": "some text here to repeat"}' localhost:10001/repeatJSON
```

## Development
Before commit run
```shell
make lint
make test
```
"##;

const GITIGNORE: &str = r##"/target
logs
.idea
"##;

const MAKEFILE: &str = r##"build:
	mkdir -p logs
	cargo build --release

clean:
	rm -rf logs/*
	cargo clean

test-run:
	./target/release/{{ project_name }}

lint:
	cargo clippy --all-targets

test:
	cargo test

.PHONY: build clean test-run lint test
"##;

const MANIFEST: &str = r##"[package]
name = "{{ project_name }}"
version = "0.1.0"
edition = "2021"
repository = "https://{{ repo_path }}/{{ project_name }}"

[dependencies]
scaffold = "0.1"
axum = "0.8"
metrics = "0.24"
serde = { version = "1", features = ["derive"] }
serde_json = "1"
tokio = { version = "1", features = ["full"] }
url = "2"
"##;

const CONFIG_JSON: &str = r##"{
  "listen_host": "localhost",
  "listen_port": 10001,
  "metrics_port": 8081,
  "http_read_timeout_sec": 5,
  "graceful_shutdown_timeout_sec": 5,
  "paths_to_logs": ["logs/log"],
  "log_env": "production"
}
"##;

const CONFIG_RS: &str = r##"//! Service configuration schema.

use std::time::Duration;

use serde::Deserialize;

/// Values from the text config needed to run the service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host for the service's HTTP server.
    pub listen_host: String,

    /// Port for the service's HTTP server.
    pub listen_port: u16,

    /// Port for the service's Prometheus metrics server.
    pub metrics_port: u16,

    /// Read timeout for the service's HTTP server, in seconds.
    #[serde(rename = "http_read_timeout_sec")]
    pub read_timeout_sec: u64,

    /// Time given to the service to gracefully release resources, in seconds.
    pub graceful_shutdown_timeout_sec: u64,

    /// Where the logger writes: any valid file path, or `stdout`/`stderr`.
    pub paths_to_logs: Vec<String>,

    /// Logging environment, e.g. "development" or "production".
    pub log_env: String,
}

impl Config {
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
"##;

const HANDLER_RS: &str = r##"//! Service HTTP handlers.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, post};
use axum::{Json, Router};
use scaffold::logger::Logger;
use serde::{Deserialize, Serialize};

const STATUS_OK_MESSAGE: &str = "200 (OK)";

const PROCESSING_DELAY: Duration = Duration::from_millis(500);

/// State shared by all handlers. Add objects every handler needs here.
#[derive(Clone)]
pub struct AppState {
    pub logger: Logger,
}

#[derive(Debug, Deserialize)]
pub struct RepeatRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RepeatResponse {
    pub text: String,
    #[serde(rename = "ElapsedMilSec")]
    pub elapsed_mil_sec: i64,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", any(ping))
        .route("/repeat", post(repeat))
        .route("/repeatJSON", post(repeat_json))
        .with_state(state)
}

/// Just answers with a fixed OK message.
pub async fn ping() -> &'static str {
    STATUS_OK_MESSAGE
}

/// Simply repeats the form-encoded `text` field of your request.
pub async fn repeat(State(state): State<AppState>, body: Bytes) -> Response {
    if body.is_empty() {
        return handle_error(
            StatusCode::BAD_REQUEST,
            &state.logger,
            "Unable to get request body",
        );
    }

    let text = url::form_urlencoded::parse(&body)
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .filter(|text| !text.is_empty());
    let Some(text) = text else {
        return handle_error(
            StatusCode::BAD_REQUEST,
            &state.logger,
            "Unable to get text parameter",
        );
    };

    Json(process(text).await).into_response()
}

/// Simply repeats the `text` field of your JSON request.
pub async fn repeat_json(State(state): State<AppState>, body: Bytes) -> Response {
    let request: RepeatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => {
            return handle_error(StatusCode::BAD_REQUEST, &state.logger, "Unable to decode body");
        }
    };

    Json(process(request.text).await).into_response()
}

async fn process(text: String) -> RepeatResponse {
    /* do work here */
    let started = Instant::now();
    tokio::time::sleep(PROCESSING_DELAY).await;

    RepeatResponse {
        text,
        elapsed_mil_sec: started.elapsed().as_millis() as i64,
    }
}

/// Send an error response and log it.
fn handle_error(status: StatusCode, logger: &Logger, text: &str) -> Response {
    let message = format!(
        "{} ({}): {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("unknown"),
        text
    );
    logger.error(&message);

    (status, message).into_response()
}
"##;

const METRICS_RS: &str = r##"//! Custom service metrics.
//!
//! Use this module to define your own Prometheus series, for example:
//!
//! ```ignore
//! use metrics::counter;
//!
//! pub fn record_my_event(label: &str) {
//!     counter!("my_new_custom_metric", "label" => label.to_string()).increment(1);
//! }
//! ```
//!
//! The basic request series (`http_requests_total` and friends) come from
//! scaffold's metrics middleware; only service-specific series belong here.
"##;

const MAIN_RS: &str = r##"mod config;
mod handler;
mod metrics;

use std::path::Path;

use scaffold::metrics::MetricsRegistry;
use scaffold::server::{wait_for_interrupt, Server, Shutdown};
use scaffold::{config as config_loader, logger, metrics as scaffold_metrics, router};

use crate::config::Config;
use crate::handler::AppState;

const CONFIG_FILE_NAME: &str = "config.json";

#[tokio::main]
async fn main() {
    // read config
    let config: Config = match config_loader::load_config(Path::new(CONFIG_FILE_NAME)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("unable to get new config: {err}");
            std::process::exit(1);
        }
    };
    println!("config: {config:?}");

    // get new logger
    let log = match logger::build(&config.log_env, &config.paths_to_logs) {
        Ok(log) => log,
        Err(err) => {
            eprintln!("unable to get new logger: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = log.install() {
        log.fatal(&format!("unable to install logger: {err}"));
    }
    // duplicate config printing to the log destinations
    log.info(&format!("config: {config:?}"));

    // metrics registry
    let registry = match MetricsRegistry::install() {
        Ok(registry) => registry,
        Err(err) => log.fatal(&format!("unable to install metrics registry: {err}")),
    };

    // start prometheus exposition server
    let metrics_addr = config.metrics_addr();
    {
        let log = log.clone();
        tokio::spawn(async move {
            log.info(&format!("starting metrics server at {metrics_addr}"));
            if let Err(err) = scaffold_metrics::server::serve(&metrics_addr, registry).await {
                log.error(&format!("metrics server error: {err}"));
            }
        });
    }

    // setting routes
    let app = router::build(handler::routes(AppState { logger: log.clone() }));

    // translate the interrupt signal into the shutdown trigger
    let shutdown = Shutdown::new();
    let wait = shutdown.wait();
    tokio::spawn(async move {
        wait_for_interrupt().await;
        shutdown.trigger();
    });

    // starting server
    let mut server = Server::new(
        config.listen_addr(),
        config.read_timeout(),
        config.shutdown_timeout(),
        log.clone(),
    );
    server.add_closer(|| { /* release service resources here */ });
    server.run(app, wait).await;

    log.info("bye :)");
}
"##;
