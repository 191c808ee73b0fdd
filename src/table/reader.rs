//! CSV ingestion into [`Table`].

use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use super::error::{TableError, TableResult};
use super::model::{Record, Table};

const UTF8_BOM: char = '\u{feff}';

impl Table {
    /// Parses comma-separated text with a mandatory header row.
    ///
    /// Cells are trimmed and blank lines are skipped. Rows whose field count differs
    /// from the header are rejected with the offending line in the message.
    pub fn from_csv_reader<R: Read>(reader: R) -> TableResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(position, name)| {
                if position == 0 {
                    name.trim_start_matches(UTF8_BOM).trim().to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();

        if columns.is_empty() || columns.iter().all(String::is_empty) {
            return Err(TableError::Parse {
                reason: "missing header row".to_string(),
            });
        }

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(Record::new(record.iter().map(str::to_string).collect()));
        }

        debug!(columns = columns.len(), rows = rows.len(), "Parsed CSV table");

        Table::new(columns, rows)
    }

    /// Parses an in-memory CSV document.
    pub fn from_csv_bytes(bytes: &[u8]) -> TableResult<Self> {
        Self::from_csv_reader(bytes)
    }

    /// Reads and parses a CSV file.
    pub fn from_csv_path(path: &Path) -> TableResult<Self> {
        let bytes = read_file(path)?;
        Self::from_csv_bytes(&bytes)
    }
}

/// Reads a whole file, reporting a missing path as [`TableError::FileNotFound`].
pub fn read_file(path: &Path) -> TableResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => TableError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => TableError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
