//! Cross-cutting, shared constants.
//!
//! Column names are fixed by deployment configuration and never taken from a
//! submission. Override them through [`crate::config::Config`] when the benchmark
//! file uses a different header.

/// Identifier column shared by the benchmark and the submission.
pub const IDENTIFIER_COLUMN: &str = "slide_id";

/// Ground-truth label column in the benchmark file.
pub const TRUTH_COLUMN: &str = "mIDH";

/// Predicted label column in the submission file.
pub const PREDICTION_COLUMN: &str = "pred";

/// Benchmark filename used when `SCORECARD_BENCHMARK_PATH` is not set.
pub const DEFAULT_BENCHMARK_FILENAME: &str = "target_data.csv";

/// Default request body limit for uploaded submissions (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Decimal places used when rendering scalar metrics.
pub const METRIC_DISPLAY_PRECISION: usize = 4;

pub const SCORECARD_STATUS_HEADER: &str = "X-Scorecard-Status";
pub const SCORECARD_STATUS_HEALTHY: &str = "healthy";
pub const SCORECARD_STATUS_READY: &str = "ready";
pub const SCORECARD_STATUS_SCORED: &str = "scored";
pub const SCORECARD_STATUS_NO_OVERLAP: &str = "no_overlap";
pub const SCORECARD_STATUS_ERROR: &str = "error";

/// The three column names an evaluation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnNames {
    /// Join key present in both tables.
    pub identifier: String,
    /// Ground-truth label column (benchmark side).
    pub truth: String,
    /// Prediction column (submission side).
    pub prediction: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            identifier: IDENTIFIER_COLUMN.to_string(),
            truth: TRUTH_COLUMN.to_string(),
            prediction: PREDICTION_COLUMN.to_string(),
        }
    }
}

impl ColumnNames {
    /// Columns the benchmark table must carry, in projection order.
    pub fn benchmark_required(&self) -> [&str; 2] {
        [self.identifier.as_str(), self.truth.as_str()]
    }

    /// Columns the submission table must carry, in projection order.
    pub fn submission_required(&self) -> [&str; 2] {
        [self.identifier.as_str(), self.prediction.as_str()]
    }
}
