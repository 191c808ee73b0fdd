//! HTTP gateway (Axum) for submission scoring.
//!
//! This module is primarily used by the `scorecard` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::evaluate_handler;
pub use state::HandlerState;

use crate::constants::{
    SCORECARD_STATUS_ERROR, SCORECARD_STATUS_HEADER, SCORECARD_STATUS_HEALTHY,
    SCORECARD_STATUS_READY,
};

pub fn create_router_with_state(state: HandlerState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/evaluate", post(evaluate_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub benchmark: BenchmarkStatus,
}

#[derive(serde::Serialize)]
pub struct BenchmarkStatus {
    pub path: String,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        SCORECARD_STATUS_HEADER,
        HeaderValue::from_static(SCORECARD_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Ready once the benchmark sits in the cache. Never triggers a load.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let cached = state.benchmarks.get(&state.benchmark_path, &state.columns);

    let benchmark = BenchmarkStatus {
        path: state.benchmark_path.display().to_string(),
        loaded: cached.is_some(),
        rows: cached.as_ref().map(|table| table.len()),
        digest: cached.as_ref().map(|table| table.digest().to_string()),
    };

    let (status_code, status_msg, header) = if benchmark.loaded {
        (StatusCode::OK, "ok", SCORECARD_STATUS_READY)
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "pending",
            SCORECARD_STATUS_ERROR,
        )
    };

    let mut headers = HeaderMap::new();
    headers.insert(SCORECARD_STATUS_HEADER, HeaderValue::from_static(header));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            benchmark,
        }),
    )
        .into_response()
}
