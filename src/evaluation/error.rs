use serde::Serialize;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::table::TableError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A label or prediction cell that is not an integer.
#[error(
    "'{column}' value '{value}' for identifier '{identifier}' (submission row {row}) could not be converted to an integer"
)]
pub struct CoercionError {
    /// Column the value came from.
    pub column: String,
    /// Identifier of the offending pair.
    pub identifier: String,
    /// 1-based submission data row.
    pub row: usize,
    /// Raw cell content.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A metric that is undefined for the observed labels.
pub enum MetricError {
    /// Sequences of true and predicted labels differ in length.
    #[error("label sequences differ in length: {true_len} true vs {pred_len} predicted")]
    LengthMismatch {
        /// Number of true labels.
        true_len: usize,
        /// Number of predicted labels.
        pred_len: usize,
    },

    /// More than two classes, or a single class outside 0/1.
    #[error("binary metrics need at most two classes; observed labels {labels:?}")]
    NotBinary {
        /// Distinct observed labels, ascending.
        labels: Vec<i64>,
    },

    /// A class never occurs among the true labels, so its recall is undefined.
    #[error("class {label} does not occur in the true labels; its recall is undefined")]
    MissingClass {
        /// The absent class.
        label: i64,
    },

    /// F1 is defined for labels 0/1 with 1 as the positive class.
    #[error("F1 needs labels 0 and 1 with 1 as the positive class; observed labels {labels:?}")]
    PositiveLabelAbsent {
        /// Class axis of the confusion matrix.
        labels: Vec<i64>,
    },
}

impl MetricError {
    /// Maps the error onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MetricComputationError
    }
}

impl Serialize for MetricError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Failure {
            kind: ErrorKind,
            message: String,
        }

        Failure {
            kind: self.kind(),
            message: self.to_string(),
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Error)]
/// Failures that abort an evaluation request.
pub enum EvaluationError {
    /// The submission could not be read, parsed or schema-validated.
    #[error("submission: {0}")]
    Submission(#[from] TableError),

    /// A label or prediction value is not an integer.
    #[error("{0}")]
    Coercion(#[from] CoercionError),
}

impl EvaluationError {
    /// Maps the error onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvaluationError::Submission(err) => err.kind(),
            EvaluationError::Coercion(_) => ErrorKind::CoercionError,
        }
    }
}

/// Convenience result type for evaluations.
pub type EvaluationResult<T> = Result<T, EvaluationError>;
