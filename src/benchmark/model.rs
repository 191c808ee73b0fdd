use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One ground-truth row. The label stays raw until it is coerced after the join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkRecord {
    /// Unique sample identifier.
    pub identifier: String,
    /// Ground-truth label as written in the file.
    pub true_label: String,
}

/// Validated, immutable benchmark: records in file order plus an identifier index.
#[derive(Debug, Clone)]
pub struct BenchmarkTable {
    source: PathBuf,
    digest: String,
    records: Vec<BenchmarkRecord>,
    index: HashMap<String, usize>,
}

impl BenchmarkTable {
    /// Assembles a table from records whose identifiers are already known to be unique.
    pub(crate) fn new(
        source: PathBuf,
        digest: String,
        records: Vec<BenchmarkRecord>,
        index: HashMap<String, usize>,
    ) -> Self {
        Self {
            source,
            digest,
            records,
            index,
        }
    }

    /// Looks up the record for `identifier`.
    #[inline]
    pub fn get(&self, identifier: &str) -> Option<&BenchmarkRecord> {
        self.index
            .get(identifier)
            .and_then(|&position| self.records.get(position))
    }

    /// Returns `true` if `identifier` is part of the benchmark.
    #[inline]
    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    /// Returns all records in file order.
    #[inline]
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the benchmark has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the path the table was loaded from.
    #[inline]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the BLAKE3 hex digest of the source file.
    #[inline]
    pub fn digest(&self) -> &str {
        &self.digest
    }
}
