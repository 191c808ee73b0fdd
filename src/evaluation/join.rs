//! Inner join of submission rows onto the benchmark by identifier.

use std::collections::HashSet;

use tracing::debug;

use super::types::{JoinDiagnostics, RawPair};
use crate::benchmark::BenchmarkTable;
use crate::constants::ColumnNames;
use crate::table::{Table, TableResult};

/// Result of [`inner_join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// At least one submission row matched.
    Matched {
        /// Pairs in submission row order.
        pairs: Vec<RawPair>,
        /// Row accounting.
        diagnostics: JoinDiagnostics,
    },
    /// No identifier is shared by both tables.
    NoOverlap(JoinDiagnostics),
}

impl JoinOutcome {
    /// Returns the row accounting for either outcome.
    pub fn diagnostics(&self) -> &JoinDiagnostics {
        match self {
            JoinOutcome::Matched { diagnostics, .. } | JoinOutcome::NoOverlap(diagnostics) => {
                diagnostics
            }
        }
    }
}

/// Joins `submission` onto `benchmark`, keeping only identifiers present in both.
///
/// Each submission row joins independently, so a repeated identifier yields one pair
/// per occurrence. `submission` must carry the identifier and prediction columns.
pub fn inner_join(
    submission: &Table,
    benchmark: &BenchmarkTable,
    columns: &ColumnNames,
) -> TableResult<JoinOutcome> {
    let identifiers = submission.column(&columns.identifier)?;
    let predictions = submission.column(&columns.prediction)?;

    let mut pairs = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (position, (identifier, predicted)) in identifiers.zip(predictions).enumerate() {
        let Some(record) = benchmark.get(identifier) else {
            continue;
        };
        seen.insert(record.identifier.as_str());
        pairs.push(RawPair {
            identifier: identifier.to_string(),
            true_label: record.true_label.clone(),
            predicted_label: predicted.to_string(),
            row: position + 1,
        });
    }

    let diagnostics = JoinDiagnostics {
        submission_rows: submission.len(),
        benchmark_rows: benchmark.len(),
        matched_rows: pairs.len(),
        unmatched_submission_rows: submission.len() - pairs.len(),
        unmatched_benchmark_identifiers: benchmark.len() - seen.len(),
    };

    debug!(
        matched = diagnostics.matched_rows,
        unmatched_submission = diagnostics.unmatched_submission_rows,
        unmatched_benchmark = diagnostics.unmatched_benchmark_identifiers,
        "Joined submission to benchmark"
    );

    if pairs.is_empty() {
        return Ok(JoinOutcome::NoOverlap(diagnostics));
    }

    Ok(JoinOutcome::Matched { pairs, diagnostics })
}
