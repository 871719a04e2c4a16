//! One pass over a run collection producing every derivation.

use ahasd_core::{AnalyzerConfig, RunCollection};
use serde::Serialize;
use tracing::info;

use crate::ablation::{ablation_compare, AblationStudy};
use crate::degrade::{Degradation, Derived};
use crate::grouped::grouped_compare;
use crate::paired::paired_compare;
use crate::summary::{export_summary, SummaryRow};
use crate::table::ComparisonTable;

/// All derivations over one run collection. Each is computed independently;
/// a degraded one never blocks the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
	/// Number of runs the report was built from.
	pub runs: usize,
	/// Model × config table.
	pub grouped: Derived<ComparisonTable>,
	/// Baseline vs. variant table.
	pub paired: Derived<ComparisonTable>,
	/// `Err` when no baseline run exists.
	pub ablation: Result<Derived<AblationStudy>, Degradation>,
	/// One row per run.
	pub summary: Vec<SummaryRow>,
}

impl Report {
	/// Run every derivation over `runs` and log what each had to skip.
	pub fn build(runs: &RunCollection, cfg: &AnalyzerConfig) -> Self {
		let grouped = grouped_compare(runs, &cfg.grouped, &cfg.delimiter);
		grouped.log_warnings("grouped");
		let paired = paired_compare(runs, &cfg.paired, &cfg.delimiter);
		paired.log_warnings("paired");
		let ablation = ablation_compare(runs, &cfg.ablation, &cfg.delimiter);
		match &ablation {
			Ok(d) => d.log_warnings("ablation"),
			Err(e) => tracing::warn!(derivation = "ablation", "{e}"),
		}
		let summary = export_summary(runs, &cfg.summary);
		info!(runs = runs.len(), pairs = paired.output.len(), models = grouped.output.len(), "derived comparisons");
		Self { runs: runs.len(), grouped, paired, ablation, summary }
	}

	/// Every degradation across all derivations, in derivation order.
	pub fn warnings(&self) -> Vec<Degradation> {
		let mut out = self.grouped.warnings.clone();
		out.extend(self.paired.warnings.iter().cloned());
		match &self.ablation {
			Ok(d) => out.extend(d.warnings.iter().cloned()),
			Err(e) => out.push(e.clone()),
		}
		out
	}
}
