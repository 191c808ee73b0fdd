use std::path::PathBuf;
use std::sync::Arc;

use crate::benchmark::BenchmarkCache;
use crate::config::Config;
use crate::constants::ColumnNames;

#[derive(Clone)]
pub struct HandlerState {
    pub benchmarks: Arc<BenchmarkCache>,

    pub benchmark_path: PathBuf,

    pub columns: ColumnNames,

    pub max_upload_bytes: usize,
}

impl HandlerState {
    pub fn new(benchmarks: Arc<BenchmarkCache>, config: &Config) -> Self {
        Self {
            benchmarks,
            benchmark_path: config.benchmark_path.clone(),
            columns: config.columns.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}
