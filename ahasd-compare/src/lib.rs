//! Cross-run derivations over a loaded [`ahasd_core::RunCollection`]:
//! grouped, paired, and ablation comparisons plus the flat summary export.
//!
//! All derivations are pure and take the collection by reference. Problems
//! they recover from locally are reported through [`Degradation`].

/// Feature progression normalized to a baseline.
pub mod ablation;
/// Degradation channel shared by every derivation.
pub mod degrade;
/// Model × config comparison.
pub mod grouped;
/// Baseline vs. variant comparison.
pub mod paired;
/// All derivations over one collection.
pub mod report;
/// Flat per-run export.
pub mod summary;
/// Renderer-agnostic tables.
pub mod table;

pub use ablation::{ablation_compare, normalize, AblationSeries, AblationStudy};
pub use degrade::{Degradation, Derived};
pub use grouped::{grouped_compare, split_identifier};
pub use paired::paired_compare;
pub use report::Report;
pub use summary::{export_summary, write_csv, SummaryRow, SUMMARY_HEADER};
pub use table::{Cell, ComparisonTable, TableRow};
