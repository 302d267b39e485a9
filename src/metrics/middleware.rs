//! Request-tracking middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Record basic metrics for every request passing through the router.
///
/// Wire up with `axum::middleware::from_fn(track_requests)`.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    super::record_request(&path, response.status().as_u16(), started);

    response
}
