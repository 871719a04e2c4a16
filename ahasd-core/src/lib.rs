//! Core of the AHASD results analyzer: the run data model, the `metrics.txt`
//! parser, the results-tree loader, configuration, and errors.

/// Analyzer settings.
pub mod config;
/// Error type and result alias.
pub mod error;
/// Run discovery and loading.
pub mod loader;
/// `metrics.txt` parsing.
pub mod parser;
/// Metric values, run records, run collection.
pub mod types;

pub use config::{AblationOptions, AblationStep, AnalyzerConfig, GroupedOptions, PairedOptions, SummaryColumns};
pub use error::{Error, Result};
pub use loader::{load, RunLoader, CONFIG_FILE, METRICS_FILE};
pub use parser::{parse, parse_file, parse_line};
pub use types::{coerce_f64, MetricRecord, MetricValue, RunCollection, RunRecord, RESERVED_CONFIG_KEY};
