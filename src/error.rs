//! Failure taxonomy shared by every stage of an evaluation.

use serde::Serialize;

/// The kind of failure an evaluation can report to a caller.
///
/// Module error types map onto one of these through their `kind()` accessor, so the
/// gateway and the CLI can render a stable classification regardless of which layer
/// failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required input file does not exist.
    FileNotFound,
    /// Tabular content could not be parsed.
    ParseError,
    /// A required column is absent.
    MissingColumns,
    /// The submission shares no identifiers with the benchmark.
    EmptyJoinResult,
    /// A label or prediction value is not an integer.
    CoercionError,
    /// A metric is undefined for the observed label distribution.
    MetricComputationError,
}

impl ErrorKind {
    /// Returns the snake_case code used in responses and status headers.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "file_not_found",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::MissingColumns => "missing_columns",
            ErrorKind::EmptyJoinResult => "empty_join_result",
            ErrorKind::CoercionError => "coercion_error",
            ErrorKind::MetricComputationError => "metric_computation_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
