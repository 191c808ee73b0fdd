use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::coerce::coerce_pairs;
use super::error::{EvaluationError, EvaluationResult};
use super::join::{JoinOutcome, inner_join};
use super::metrics::{MetricOutcome, MetricsReport};
use super::types::{EvaluationWarning, JoinDiagnostics};
use crate::benchmark::BenchmarkTable;
use crate::constants::{ColumnNames, METRIC_DISPLAY_PRECISION};
use crate::hashing::digest_hex;
use crate::table::{Table, reader::read_file};

/// Outcome of a completed evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    /// Metrics were computed over the matched rows.
    Scored(EvaluationReport),
    /// The submission shares no identifier with the benchmark.
    NoOverlap {
        /// Row accounting for the empty join.
        join: JoinDiagnostics,
    },
}

impl Evaluation {
    /// Returns the report when metrics were computed.
    pub fn report(&self) -> Option<&EvaluationReport> {
        match self {
            Evaluation::Scored(report) => Some(report),
            Evaluation::NoOverlap { .. } => None,
        }
    }

    /// Returns `true` for the empty-join outcome.
    pub fn is_no_overlap(&self) -> bool {
        matches!(self, Evaluation::NoOverlap { .. })
    }
}

/// Metrics, warnings and provenance for one scored submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Number of aligned pairs; equals the confusion matrix total.
    pub n_matched: usize,
    #[serde(flatten)]
    pub metrics: MetricsReport,
    /// Advisory notes; empty when all labels are 0 or 1.
    pub warnings: Vec<EvaluationWarning>,
    /// Row accounting for the join.
    pub join: JoinDiagnostics,
    /// BLAKE3 digest of the benchmark file.
    pub benchmark_digest: String,
    /// BLAKE3 digest of the submission bytes, when evaluated from bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_digest: Option<String>,
}

/// Scores submissions against one benchmark.
#[derive(Debug, Clone)]
pub struct Evaluator {
    benchmark: Arc<BenchmarkTable>,
    columns: ColumnNames,
}

impl Evaluator {
    pub fn new(benchmark: Arc<BenchmarkTable>, columns: ColumnNames) -> Self {
        Self { benchmark, columns }
    }

    /// Returns the benchmark this evaluator scores against.
    pub fn benchmark(&self) -> &BenchmarkTable {
        &self.benchmark
    }

    /// Evaluates a submission CSV held in memory.
    pub fn evaluate_bytes(&self, bytes: &[u8]) -> EvaluationResult<Evaluation> {
        let digest = digest_hex(bytes);
        let table = Table::from_csv_bytes(bytes)?;
        self.evaluate(&table, Some(digest))
    }

    /// Reads and evaluates a submission CSV file.
    pub fn evaluate_path(&self, path: &Path) -> EvaluationResult<Evaluation> {
        let bytes = read_file(path)?;
        self.evaluate_bytes(&bytes)
    }

    /// Evaluates an already parsed submission.
    pub fn evaluate_table(&self, table: &Table) -> EvaluationResult<Evaluation> {
        self.evaluate(table, None)
    }

    fn evaluate(
        &self,
        table: &Table,
        submission_digest: Option<String>,
    ) -> EvaluationResult<Evaluation> {
        let submission = table.project(&self.columns.submission_required())?;

        let (pairs, join) = match inner_join(&submission, &self.benchmark, &self.columns)? {
            JoinOutcome::Matched { pairs, diagnostics } => (pairs, diagnostics),
            JoinOutcome::NoOverlap(join) => {
                info!(
                    submission_rows = join.submission_rows,
                    "No matching identifiers between submission and benchmark"
                );
                return Ok(Evaluation::NoOverlap { join });
            }
        };

        let coerced = coerce_pairs(pairs, &self.columns)?;

        let (y_true, y_pred): (Vec<i64>, Vec<i64>) = coerced
            .pairs
            .iter()
            .map(|pair| (pair.true_label.value, pair.predicted_label.value))
            .unzip();
        let metrics = MetricsReport::compute(&y_true, &y_pred);

        if let MetricOutcome::Value(matrix) = &metrics.confusion_matrix {
            debug_assert_eq!(matrix.total(), coerced.pairs.len() as u64);
        }

        let report = EvaluationReport {
            n_matched: coerced.pairs.len(),
            metrics,
            warnings: coerced.warnings,
            join,
            benchmark_digest: self.benchmark.digest().to_string(),
            submission_digest,
        };

        debug!(
            n_matched = report.n_matched,
            warnings = report.warnings.len(),
            "Submission scored"
        );

        Ok(Evaluation::Scored(report))
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = METRIC_DISPLAY_PRECISION;

        writeln!(f, "Matched rows: {}", self.n_matched)?;
        writeln!(
            f,
            "Dropped: {} submission rows without a benchmark match, {} benchmark samples not submitted",
            self.join.unmatched_submission_rows, self.join.unmatched_benchmark_identifiers
        )?;

        writeln!(f, "Confusion Matrix")?;
        match &self.metrics.confusion_matrix {
            MetricOutcome::Value(matrix) => {
                let [negative, positive] = matrix.labels();
                let cells = matrix.matrix();
                writeln!(
                    f,
                    "{:>12}{:>14}{:>14}",
                    "",
                    format!("Predicted {}", negative),
                    format!("Predicted {}", positive)
                )?;
                for (label, row) in [negative, positive].iter().zip(cells.iter()) {
                    writeln!(
                        f,
                        "{:<12}{:>14}{:>14}",
                        format!("Actual {}", label),
                        row[0],
                        row[1]
                    )?;
                }
                writeln!(f, "True Positives (TP): {}", matrix.true_positives())?;
                writeln!(f, "True Negatives (TN): {}", matrix.true_negatives())?;
                writeln!(f, "False Positives (FP): {}", matrix.false_positives())?;
                writeln!(f, "False Negatives (FN): {}", matrix.false_negatives())?;
            }
            MetricOutcome::Error(err) => writeln!(f, "Error calculating Confusion Matrix: {}", err)?,
        }

        match &self.metrics.balanced_accuracy {
            MetricOutcome::Value(value) => {
                writeln!(f, "Balanced Accuracy: {:.*}", precision, value)?
            }
            MetricOutcome::Error(err) => {
                writeln!(f, "Error calculating Balanced Accuracy: {}", err)?
            }
        }

        match &self.metrics.f1_score {
            MetricOutcome::Value(value) => writeln!(f, "F1 Score: {:.*}", precision, value)?,
            MetricOutcome::Error(err) => writeln!(f, "Error calculating F1 Score: {}", err)?,
        }

        for warning in &self.warnings {
            writeln!(f, "Warning: {}", warning)?;
        }

        Ok(())
    }
}
