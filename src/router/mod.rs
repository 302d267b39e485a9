//! Router composition.
//!
//! Every generated service routes through here: application routes are
//! merged with the diagnostic endpoints and wrapped in the metrics
//! middleware, so all traffic is counted.

use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::metrics::middleware::track_requests;

/// Fixed prefix for diagnostic introspection endpoints.
pub const DEBUG_PATH_PREFIX: &str = "/debug";

/// Wrap application routes with the metrics and trace middleware and mount
/// the diagnostic endpoints.
pub fn build(app: Router) -> Router {
    app.nest(DEBUG_PATH_PREFIX, debug_routes())
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
}

/// Diagnostic endpoints, mounted under [`DEBUG_PATH_PREFIX`].
pub fn debug_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/buildinfo", get(build_info))
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn health() -> &'static str {
    "ok"
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
