//! Integer coercion of joined label cells.
//!
//! A cell is accepted when it reads as an integer (`1`, `+1`, `-3`), an integral
//! float (`1.0`, `0e0`) or a boolean (`true`/`false`, any case). Blank cells,
//! non-integral numbers, `nan`/`inf` and free text are rejected.
//!
//! Integers outside `{0, 1}` are accepted and reported through
//! [`EvaluationWarning`]s.

use tracing::warn;

use super::error::CoercionError;
use super::types::{AlignedPair, CoercedLabel, EvaluationWarning, RawPair};
use crate::constants::ColumnNames;

/// Coerced pairs plus any advisory warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coerced {
    pub pairs: Vec<AlignedPair>,
    pub warnings: Vec<EvaluationWarning>,
}

/// Parses one cell as an integer label.
pub fn parse_label(raw: &str) -> Option<i64> {
    let cell = raw.trim();
    if cell.is_empty() {
        return None;
    }

    if let Ok(value) = cell.parse::<i64>() {
        return Some(value);
    }

    if cell.eq_ignore_ascii_case("true") {
        return Some(1);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Some(0);
    }

    let value = cell.parse::<f64>().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Coerces both label columns of every pair, truth column first.
///
/// The first unparseable cell aborts the whole set.
pub fn coerce_pairs(pairs: Vec<RawPair>, columns: &ColumnNames) -> Result<Coerced, CoercionError> {
    let truth = coerce_column(&pairs, &columns.truth, |p| &p.true_label)?;
    let predicted = coerce_column(&pairs, &columns.prediction, |p| &p.predicted_label)?;

    let non_binary_predictions = predicted.iter().filter(|l| !l.in_domain).count();
    let non_binary_truth = truth.iter().filter(|l| !l.in_domain).count();

    let mut warnings = Vec::new();
    if non_binary_predictions > 0 {
        warn!(
            column = %columns.prediction,
            count = non_binary_predictions,
            "Predictions outside {{0, 1}}"
        );
        warnings.push(EvaluationWarning::NonBinaryPredictions {
            column: columns.prediction.clone(),
            count: non_binary_predictions,
        });
    }
    if non_binary_truth > 0 {
        warn!(
            column = %columns.truth,
            count = non_binary_truth,
            "Ground-truth labels outside {{0, 1}}"
        );
        warnings.push(EvaluationWarning::NonBinaryTruth {
            column: columns.truth.clone(),
            count: non_binary_truth,
        });
    }

    let pairs = pairs
        .into_iter()
        .zip(truth.into_iter().zip(predicted))
        .map(|(pair, (true_label, predicted_label))| AlignedPair {
            identifier: pair.identifier,
            true_label,
            predicted_label,
        })
        .collect();

    Ok(Coerced { pairs, warnings })
}

fn coerce_column<F>(
    pairs: &[RawPair],
    column: &str,
    cell: F,
) -> Result<Vec<CoercedLabel>, CoercionError>
where
    F: Fn(&RawPair) -> &String,
{
    pairs
        .iter()
        .map(|pair| {
            let raw = cell(pair);
            parse_label(raw)
                .map(CoercedLabel::new)
                .ok_or_else(|| CoercionError {
                    column: column.to_string(),
                    identifier: pair.identifier.clone(),
                    row: pair.row,
                    value: raw.clone(),
                })
        })
        .collect()
}
