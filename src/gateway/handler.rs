use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::constants::{
    SCORECARD_STATUS_HEADER, SCORECARD_STATUS_NO_OVERLAP, SCORECARD_STATUS_SCORED,
};
use crate::error::ErrorKind;
use crate::evaluation::{Evaluation, Evaluator, JoinDiagnostics};
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;

/// Message reported when a submission shares no identifier with the benchmark.
pub fn no_overlap_message(identifier_column: &str) -> String {
    format!(
        "No matching '{}' found between submission and target data. Cannot calculate metrics.",
        identifier_column
    )
}

#[derive(Serialize)]
pub struct NoOverlapResponse {
    pub status: &'static str,
    pub kind: ErrorKind,
    pub message: String,
    pub join: JoinDiagnostics,
}

/// Scores a CSV submission sent as the raw request body.
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn evaluate_handler(
    State(state): State<HandlerState>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let HandlerState {
        benchmarks,
        benchmark_path,
        columns,
        ..
    } = state;
    let message = no_overlap_message(&columns.identifier);

    let evaluation = tokio::task::spawn_blocking(move || {
        let benchmark = benchmarks
            .get_or_load(&benchmark_path, &columns)
            .map_err(GatewayError::BenchmarkUnavailable)?;
        Evaluator::new(benchmark, columns)
            .evaluate_bytes(&body)
            .map_err(GatewayError::from)
    })
    .await
    .map_err(|e| GatewayError::InternalError(format!("evaluation task failed: {}", e)))?
    .inspect_err(|e| warn!(error = %e, "Evaluation rejected"))?;

    let mut headers = HeaderMap::new();
    let response = match &evaluation {
        Evaluation::Scored(report) => {
            info!(
                n_matched = report.n_matched,
                warnings = report.warnings.len(),
                "Submission scored"
            );
            headers.insert(
                SCORECARD_STATUS_HEADER,
                HeaderValue::from_static(SCORECARD_STATUS_SCORED),
            );
            (StatusCode::OK, headers, Json(&evaluation)).into_response()
        }
        Evaluation::NoOverlap { join } => {
            headers.insert(
                SCORECARD_STATUS_HEADER,
                HeaderValue::from_static(SCORECARD_STATUS_NO_OVERLAP),
            );
            let body = NoOverlapResponse {
                status: SCORECARD_STATUS_NO_OVERLAP,
                kind: ErrorKind::EmptyJoinResult,
                message,
                join: *join,
            };
            (StatusCode::OK, headers, Json(body)).into_response()
        }
    };

    Ok(response)
}
