use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorKind;

#[derive(Debug, Error)]
/// Errors raised while reading or validating a table.
pub enum TableError {
    /// Input file does not exist.
    #[error("file '{path}' not found")]
    FileNotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// Input file exists but could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Requested path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Content is not well-formed delimited text.
    #[error("malformed tabular content: {reason}")]
    Parse {
        /// Error message.
        reason: String,
    },

    /// One or more required columns are absent.
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Absent column names, sorted.
        missing: Vec<String>,
    },
}

impl TableError {
    /// Maps the error onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TableError::FileNotFound { .. } => ErrorKind::FileNotFound,
            TableError::Io { .. } | TableError::Parse { .. } => ErrorKind::ParseError,
            TableError::MissingColumns { .. } => ErrorKind::MissingColumns,
        }
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        TableError::Parse {
            reason: err.to_string(),
        }
    }
}

/// Convenience result type for table operations.
pub type TableResult<T> = Result<T, TableError>;
