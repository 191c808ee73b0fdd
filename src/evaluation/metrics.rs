//! Confusion matrix, balanced accuracy and F1 for binary labels.
//!
//! Every scalar metric is derived from a [`ConfusionMatrix`]. Each one is computed
//! and reported independently: an undefined balanced accuracy does not hide a
//! valid F1.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::error::MetricError;

/// 2x2 outcome counts. Rows are true classes, columns predicted classes, both in
/// ascending label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "ConfusionMatrixView")]
pub struct ConfusionMatrix {
    labels: [i64; 2],
    cells: [[u64; 2]; 2],
}

impl ConfusionMatrix {
    /// Counts outcomes over parallel label sequences.
    ///
    /// The class axis is `[0, 1]` whenever every observed label is 0 or 1 (even if
    /// only one of them occurs). Otherwise exactly two distinct labels are required
    /// and they are ordered ascending.
    pub fn from_labels(y_true: &[i64], y_pred: &[i64]) -> Result<Self, MetricError> {
        if y_true.len() != y_pred.len() {
            return Err(MetricError::LengthMismatch {
                true_len: y_true.len(),
                pred_len: y_pred.len(),
            });
        }

        let labels = class_axis(y_true, y_pred)?;
        let slot = |label: i64| usize::from(label == labels[1]);

        let mut cells = [[0u64; 2]; 2];
        for (&t, &p) in y_true.iter().zip(y_pred) {
            cells[slot(t)][slot(p)] += 1;
        }

        Ok(Self { labels, cells })
    }

    /// Class labels for index 0 and 1.
    #[inline]
    pub fn labels(&self) -> [i64; 2] {
        self.labels
    }

    /// Raw counts, `matrix()[true][predicted]`.
    #[inline]
    pub fn matrix(&self) -> [[u64; 2]; 2] {
        self.cells
    }

    #[inline]
    pub fn true_negatives(&self) -> u64 {
        self.cells[0][0]
    }

    #[inline]
    pub fn false_positives(&self) -> u64 {
        self.cells[0][1]
    }

    #[inline]
    pub fn false_negatives(&self) -> u64 {
        self.cells[1][0]
    }

    #[inline]
    pub fn true_positives(&self) -> u64 {
        self.cells[1][1]
    }

    /// Sum of all cells.
    #[inline]
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }
}

fn class_axis(y_true: &[i64], y_pred: &[i64]) -> Result<[i64; 2], MetricError> {
    let observed: BTreeSet<i64> = y_true.iter().chain(y_pred).copied().collect();

    if observed.iter().all(|label| matches!(label, 0 | 1)) {
        return Ok([0, 1]);
    }

    let labels: Vec<i64> = observed.into_iter().collect();
    match labels.as_slice() {
        [negative, positive] => Ok([*negative, *positive]),
        _ => Err(MetricError::NotBinary { labels }),
    }
}

/// Mean of per-class recall.
///
/// Fails if either class is absent from the true labels.
pub fn balanced_accuracy(matrix: &ConfusionMatrix) -> Result<f64, MetricError> {
    let positives = matrix.true_positives() + matrix.false_negatives();
    let negatives = matrix.true_negatives() + matrix.false_positives();

    if negatives == 0 {
        return Err(MetricError::MissingClass {
            label: matrix.labels[0],
        });
    }
    if positives == 0 {
        return Err(MetricError::MissingClass {
            label: matrix.labels[1],
        });
    }

    let sensitivity = matrix.true_positives() as f64 / positives as f64;
    let specificity = matrix.true_negatives() as f64 / negatives as f64;
    Ok(0.5 * (sensitivity + specificity))
}

/// F1 of the positive class (label 1): `2TP / (2TP + FP + FN)`, 0 when that
/// denominator is 0.
pub fn f1_score(matrix: &ConfusionMatrix) -> Result<f64, MetricError> {
    if matrix.labels != [0, 1] {
        return Err(MetricError::PositiveLabelAbsent {
            labels: matrix.labels.to_vec(),
        });
    }

    let tp = matrix.true_positives();
    let denominator = 2 * tp + matrix.false_positives() + matrix.false_negatives();
    if denominator == 0 {
        return Ok(0.0);
    }
    Ok((2 * tp) as f64 / denominator as f64)
}

/// A metric value or the reason it could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricOutcome<T> {
    Value(T),
    Error(MetricError),
}

impl<T> MetricOutcome<T> {
    /// Returns the value, if computed.
    pub fn value(&self) -> Option<&T> {
        match self {
            MetricOutcome::Value(value) => Some(value),
            MetricOutcome::Error(_) => None,
        }
    }

    /// Returns the failure, if any.
    pub fn error(&self) -> Option<&MetricError> {
        match self {
            MetricOutcome::Value(_) => None,
            MetricOutcome::Error(err) => Some(err),
        }
    }
}

impl<T> From<Result<T, MetricError>> for MetricOutcome<T> {
    fn from(result: Result<T, MetricError>) -> Self {
        match result {
            Ok(value) => MetricOutcome::Value(value),
            Err(err) => MetricOutcome::Error(err),
        }
    }
}

/// All metrics for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub confusion_matrix: MetricOutcome<ConfusionMatrix>,
    pub balanced_accuracy: MetricOutcome<f64>,
    pub f1_score: MetricOutcome<f64>,
}

impl MetricsReport {
    /// Computes every metric over parallel label sequences.
    pub fn compute(y_true: &[i64], y_pred: &[i64]) -> Self {
        let matrix = ConfusionMatrix::from_labels(y_true, y_pred);

        let balanced_accuracy = matrix
            .as_ref()
            .map_err(|err| err.clone())
            .and_then(balanced_accuracy);
        let f1_score = matrix
            .as_ref()
            .map_err(|err| err.clone())
            .and_then(f1_score);

        debug!(
            pairs = y_true.len(),
            balanced_accuracy = ?balanced_accuracy,
            f1_score = ?f1_score,
            "Computed metrics"
        );

        Self {
            confusion_matrix: matrix.into(),
            balanced_accuracy: balanced_accuracy.into(),
            f1_score: f1_score.into(),
        }
    }
}

#[derive(Serialize)]
struct ConfusionMatrixView {
    labels: [i64; 2],
    matrix: [[u64; 2]; 2],
    true_negatives: u64,
    false_positives: u64,
    false_negatives: u64,
    true_positives: u64,
}

impl From<ConfusionMatrix> for ConfusionMatrixView {
    fn from(matrix: ConfusionMatrix) -> Self {
        Self {
            labels: matrix.labels,
            matrix: matrix.cells,
            true_negatives: matrix.true_negatives(),
            false_positives: matrix.false_positives(),
            false_negatives: matrix.false_negatives(),
            true_positives: matrix.true_positives(),
        }
    }
}
