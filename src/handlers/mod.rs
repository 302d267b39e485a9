//! Starter HTTP surface emitted into generated projects.
//!
//! Three endpoints: a fixed acknowledgment on `/`, and two echo handlers
//! (`/repeat` for form bodies, `/repeatJSON` for JSON bodies) that simulate
//! work with a fixed 500 ms delay and report the measured elapsed time.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::logger::Logger;

const STATUS_OK_MESSAGE: &str = "200 (OK)";

/// Simulated processing time for the echo handlers.
const PROCESSING_DELAY: Duration = Duration::from_millis(500);

/// State shared by all handlers.
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

/// Build the starter routes.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", any(ping))
        .route("/repeat", post(repeat))
        .route("/repeatJSON", post(repeat_json))
        .with_state(state)
}

/// Fixed acknowledgment, any method.
pub async fn ping() -> &'static str {
    STATUS_OK_MESSAGE
}

/// Echo a form-encoded `text` field.
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

/// Echo the `text` field of a JSON body.
pub async fn repeat_json(State(state): State<AppState>, body: Bytes) -> Response {
    let request: RepeatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => {
            return handle_error(StatusCode::BAD_REQUEST, &state.logger, "Unable to decode body");
        }
    };

    Json(process(request.text).await).into_response()
}

/// The stand-in for real work: sleep, then report measured elapsed time.
async fn process(text: String) -> RepeatResponse {
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
