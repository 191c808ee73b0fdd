//! Ground-truth benchmark loading and the process-wide benchmark cache.
//!
//! The benchmark is read once, validated (identifier and truth columns present,
//! identifiers unique), projected to those two columns and shared read-only for
//! the rest of the process. Use [`BenchmarkCache::get_or_load`] to reach it.

pub mod error;
pub mod loader;
pub mod model;


pub use error::{BenchmarkError, BenchmarkResult, SharedBenchmarkError};
pub use loader::{BenchmarkCache, load_benchmark, load_benchmark_bytes};
pub use model::{BenchmarkRecord, BenchmarkTable};
