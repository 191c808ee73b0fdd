//! Submission scoring: join, coerce, measure.
//!
//! [`Evaluator`] drives the pipeline for one submission:
//!
//! 1. schema check and projection of the submission (identifier + prediction)
//! 2. [`inner_join`] against the cached benchmark; no shared identifier yields
//!    [`Evaluation::NoOverlap`] rather than an error
//! 3. [`coerce_pairs`] to integers; an unparseable cell aborts with
//!    [`CoercionError`], out-of-domain integers only add warnings
//! 4. [`MetricsReport::compute`], where each metric succeeds or fails on its own

pub mod coerce;
pub mod error;
pub mod evaluator;
pub mod join;
pub mod metrics;
pub mod types;

#[cfg(test)]
mod tests;

pub use coerce::{Coerced, coerce_pairs, parse_label};
pub use error::{CoercionError, EvaluationError, EvaluationResult, MetricError};
pub use evaluator::{Evaluation, EvaluationReport, Evaluator};
pub use join::{JoinOutcome, inner_join};
pub use metrics::{ConfusionMatrix, MetricOutcome, MetricsReport, balanced_accuracy, f1_score};
pub use types::{AlignedPair, CoercedLabel, EvaluationWarning, JoinDiagnostics, RawPair};
