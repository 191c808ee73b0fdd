//! Scorecard library crate (used by the server binary and integration tests).
//!
//! Scores binary-classification submissions against a ground-truth benchmark.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`ColumnNames`] - Identifier, truth and prediction column names
//! - [`ErrorKind`] - Stable failure classification
//!
//! ## Pipeline
//! - [`Table`] - Parsed CSV with schema checks and projection
//! - [`BenchmarkCache`], [`BenchmarkTable`] - Load-once ground truth
//! - [`Evaluator`], [`Evaluation`], [`EvaluationReport`] - Join, coerce, measure
//! - [`ConfusionMatrix`], [`MetricsReport`] - Binary classification metrics
//!
//! ## Serving
//! - [`gateway`] - Axum router exposing `/v1/evaluate`

pub mod benchmark;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod gateway;
pub mod hashing;
pub mod table;

pub use benchmark::{
    BenchmarkCache, BenchmarkError, BenchmarkRecord, BenchmarkTable, SharedBenchmarkError,
    load_benchmark,
};
pub use config::{Config, ConfigError};
pub use constants::ColumnNames;
pub use error::ErrorKind;
pub use evaluation::{
    ConfusionMatrix, Evaluation, EvaluationError, EvaluationReport, EvaluationWarning, Evaluator,
    JoinDiagnostics, MetricError, MetricOutcome, MetricsReport, balanced_accuracy, f1_score,
};
pub use table::{Table, TableError};
