use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::benchmark::SharedBenchmarkError;
use crate::constants::{SCORECARD_STATUS_ERROR, SCORECARD_STATUS_HEADER};
use crate::error::ErrorKind;
use crate::evaluation::EvaluationError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Evaluation(#[from] EvaluationError),

    #[error("benchmark unavailable: {0}")]
    BenchmarkUnavailable(SharedBenchmarkError),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl GatewayError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            GatewayError::Evaluation(err) => Some(err.kind()),
            GatewayError::BenchmarkUnavailable(err) => Some(err.kind()),
            GatewayError::InternalError(_) => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Evaluation(err) => match err.kind() {
                ErrorKind::CoercionError => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::BAD_REQUEST,
            },
            GatewayError::BenchmarkUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind();
        let scorecard_status = kind.map(|k| k.code()).unwrap_or(SCORECARD_STATUS_ERROR);

        let mut headers = HeaderMap::new();
        headers.insert(
            SCORECARD_STATUS_HEADER,
            HeaderValue::from_static(scorecard_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            kind,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
