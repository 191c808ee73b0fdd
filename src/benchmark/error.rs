use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::table::TableError;

#[derive(Debug, Error)]
/// Errors returned while loading the ground-truth benchmark.
pub enum BenchmarkError {
    /// Reading, parsing or schema validation failed.
    #[error("benchmark file '{path}': {source}")]
    Table {
        /// Benchmark path.
        path: PathBuf,
        /// Underlying table error.
        #[source]
        source: TableError,
    },

    /// An identifier occurs on more than one row.
    #[error(
        "benchmark file '{path}': identifier '{identifier}' appears on rows {first_row} and {duplicate_row}"
    )]
    DuplicateIdentifier {
        /// Benchmark path.
        path: PathBuf,
        /// Repeated identifier.
        identifier: String,
        /// 1-based data row of the first occurrence.
        first_row: usize,
        /// 1-based data row of the repeat.
        duplicate_row: usize,
    },
}

impl BenchmarkError {
    /// Maps the error onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BenchmarkError::Table { source, .. } => source.kind(),
            BenchmarkError::DuplicateIdentifier { .. } => ErrorKind::ParseError,
        }
    }
}

/// Load failures are shared between every caller that waited on the same load.
pub type SharedBenchmarkError = Arc<BenchmarkError>;

/// Convenience result type for benchmark operations.
pub type BenchmarkResult<T> = Result<T, BenchmarkError>;
