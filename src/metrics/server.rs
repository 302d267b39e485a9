//! Standalone exposition server for Prometheus scrapes.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use super::MetricsRegistry;

const PROMETHEUS_METRICS_PATH: &str = "/metrics";

/// Serve the registry at `GET /metrics` on its own address.
///
/// Runs until the listener fails; the caller decides how to react.
pub async fn serve(addr: &str, registry: MetricsRegistry) -> Result<(), std::io::Error> {
    let app = Router::new()
        .route(PROMETHEUS_METRICS_PATH, get(render))
        .with_state(registry);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn render(State(registry): State<MetricsRegistry>) -> String {
    registry.render()
}
