use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use moka::sync::Cache;
use once_cell::sync::Lazy;
use tracing::{info, warn};

use super::error::{BenchmarkError, BenchmarkResult, SharedBenchmarkError};
use super::model::{BenchmarkRecord, BenchmarkTable};
use crate::constants::ColumnNames;
use crate::hashing::digest_hex;
use crate::table::{Table, reader::read_file};

/// Reads, validates and indexes the benchmark at `path`.
pub fn load_benchmark(path: &Path, columns: &ColumnNames) -> BenchmarkResult<BenchmarkTable> {
    let bytes = read_file(path).map_err(|source| BenchmarkError::Table {
        path: path.to_path_buf(),
        source,
    })?;
    load_benchmark_bytes(&bytes, path, columns)
}

/// Builds a benchmark from in-memory CSV; `source` is used for messages only.
///
/// Extra columns are dropped. Identifiers must be unique.
pub fn load_benchmark_bytes(
    bytes: &[u8],
    source: &Path,
    columns: &ColumnNames,
) -> BenchmarkResult<BenchmarkTable> {
    let wrap = |err| BenchmarkError::Table {
        path: source.to_path_buf(),
        source: err,
    };

    let table = Table::from_csv_bytes(bytes).map_err(wrap)?;
    let projected = table.project(&columns.benchmark_required()).map_err(wrap)?;

    let mut records = Vec::with_capacity(projected.len());
    let mut index = HashMap::with_capacity(projected.len());

    for (position, row) in projected.rows().iter().enumerate() {
        let identifier = row.get(0).unwrap_or_default().to_string();
        let true_label = row.get(1).unwrap_or_default().to_string();

        match index.entry(identifier.clone()) {
            Entry::Occupied(existing) => {
                return Err(BenchmarkError::DuplicateIdentifier {
                    path: source.to_path_buf(),
                    identifier,
                    first_row: *existing.get() + 1,
                    duplicate_row: position + 1,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }

        records.push(BenchmarkRecord {
            identifier,
            true_label,
        });
    }

    let digest = digest_hex(bytes);

    if records.is_empty() {
        warn!(path = %source.display(), "Benchmark has no rows; every submission will report no overlap");
    }
    info!(
        path = %source.display(),
        rows = records.len(),
        digest = %digest,
        "Benchmark loaded"
    );

    Ok(BenchmarkTable::new(
        source.to_path_buf(),
        digest,
        records,
        index,
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BenchmarkKey {
    path: PathBuf,
    columns: ColumnNames,
}

static GLOBAL: Lazy<Arc<BenchmarkCache>> = Lazy::new(|| Arc::new(BenchmarkCache::new()));

/// Load-once holder for benchmark tables.
///
/// Entries are keyed by canonical path and column names and never expire; the
/// table is immutable once inserted. Concurrent first requests for the same key
/// wait on a single load. Failed loads are not cached.
pub struct BenchmarkCache {
    entries: Cache<BenchmarkKey, Arc<BenchmarkTable>>,
    loads: AtomicUsize,
}

impl BenchmarkCache {
    const MAX_ENTRIES: u64 = 16;

    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().max_capacity(Self::MAX_ENTRIES).build(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Returns the process-wide cache.
    pub fn global() -> Arc<BenchmarkCache> {
        Arc::clone(&GLOBAL)
    }

    /// Returns the cached table for `path`, loading it on first access.
    pub fn get_or_load(
        &self,
        path: &Path,
        columns: &ColumnNames,
    ) -> Result<Arc<BenchmarkTable>, SharedBenchmarkError> {
        let key = BenchmarkKey {
            path: path.canonicalize().unwrap_or_else(|_| path.to_path_buf()),
            columns: columns.clone(),
        };

        self.entries.try_get_with(key, || {
            self.loads.fetch_add(1, Ordering::AcqRel);
            load_benchmark(path, columns).map(Arc::new)
        })
    }

    /// Returns the cached table without loading.
    pub fn get(&self, path: &Path, columns: &ColumnNames) -> Option<Arc<BenchmarkTable>> {
        let key = BenchmarkKey {
            path: path.canonicalize().unwrap_or_else(|_| path.to_path_buf()),
            columns: columns.clone(),
        };
        self.entries.get(&key)
    }

    /// Returns how many loads have actually run (successful or not).
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Acquire)
    }
}

impl Default for BenchmarkCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BenchmarkCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkCache")
            .field("entries", &self.entries.entry_count())
            .field("loads", &self.load_count())
            .finish()
    }
}
