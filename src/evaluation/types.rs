use serde::Serialize;

/// A joined row before coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    /// Shared identifier.
    pub identifier: String,
    /// Benchmark label cell.
    pub true_label: String,
    /// Submission prediction cell.
    pub predicted_label: String,
    /// 1-based submission data row the pair came from.
    pub row: usize,
}

/// An integer label plus whether it lies in `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoercedLabel {
    /// Parsed value.
    pub value: i64,
    /// `true` if `value` is 0 or 1.
    pub in_domain: bool,
}

impl CoercedLabel {
    #[inline]
    pub fn new(value: i64) -> Self {
        Self {
            value,
            in_domain: matches!(value, 0 | 1),
        }
    }
}

/// A joined row with both labels coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedPair {
    pub identifier: String,
    pub true_label: CoercedLabel,
    pub predicted_label: CoercedLabel,
}

/// Advisory notes attached to a scored evaluation. They never abort processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum EvaluationWarning {
    /// Some predictions are integers other than 0 or 1.
    NonBinaryPredictions {
        /// Prediction column name.
        column: String,
        /// Number of affected pairs.
        count: usize,
    },
    /// Some ground-truth labels are integers other than 0 or 1.
    NonBinaryTruth {
        /// Truth column name.
        column: String,
        /// Number of affected pairs.
        count: usize,
    },
}

impl std::fmt::Display for EvaluationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationWarning::NonBinaryPredictions { column, count } => write!(
                f,
                "'{}' column contains values other than 0 or 1 ({} rows). Metrics might be unreliable for binary classification.",
                column, count
            ),
            EvaluationWarning::NonBinaryTruth { column, count } => write!(
                f,
                "'{}' column in target data contains values other than 0 or 1 ({} rows). Metrics might be unreliable for binary classification.",
                column, count
            ),
        }
    }
}

impl From<EvaluationWarning> for String {
    fn from(warning: EvaluationWarning) -> Self {
        warning.to_string()
    }
}

/// Row accounting for a join, including what was dropped on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct JoinDiagnostics {
    /// Rows in the submission.
    pub submission_rows: usize,
    /// Rows in the benchmark.
    pub benchmark_rows: usize,
    /// Pairs produced (duplicates in the submission each count).
    pub matched_rows: usize,
    /// Submission rows whose identifier is not in the benchmark.
    pub unmatched_submission_rows: usize,
    /// Benchmark identifiers the submission never mentions.
    pub unmatched_benchmark_identifiers: usize,
}
