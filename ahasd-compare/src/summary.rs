//! Flat one-row-per-run export.

use std::io::{self, Write};

use ahasd_core::{RunCollection, SummaryColumns};
use serde::Serialize;

/// Column header of `summary_table.csv`. Changing it is a format change.
pub const SUMMARY_HEADER: [&str; 7] = [
	"Configuration",
	"Throughput (tokens/s)",
	"Energy (mJ)",
	"Energy Efficiency (tokens/mJ)",
	"Draft Acceptance Rate (%)",
	"EDC Accuracy (%)",
	"TVC Success Rate (%)",
];

/// One run's line in the summary table. Fields follow [`SUMMARY_HEADER`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct SummaryRow {
	/// Run identifier.
	pub configuration: String,
	pub throughput: f64,
	pub energy: f64,
	pub energy_efficiency: f64,
	pub acceptance_rate: f64,
	pub edc_accuracy: f64,
	pub tvc_success_rate: f64,
}

impl SummaryRow {
	/// Numeric columns in header order.
	pub fn values(&self) -> [f64; 6] {
		[self.throughput, self.energy, self.energy_efficiency, self.acceptance_rate, self.edc_accuracy, self.tvc_success_rate]
	}
}

/// One row per run, sorted by identifier. Missing metrics read as `0.0`.
pub fn export_summary(runs: &RunCollection, columns: &SummaryColumns) -> Vec<SummaryRow> {
	runs.iter()
		.map(|(id, run)| {
			let read = |keys: &[String]| run.first_number_or_zero(keys);
			SummaryRow {
				configuration: id.clone(),
				throughput: read(&columns.throughput),
				energy: read(&columns.energy),
				energy_efficiency: read(&columns.energy_efficiency),
				acceptance_rate: read(&columns.acceptance_rate),
				edc_accuracy: read(&columns.edc_accuracy),
				tvc_success_rate: read(&columns.tvc_success_rate),
			}
		})
		.collect()
}

/// Write rows as CSV with [`SUMMARY_HEADER`].
pub fn write_csv<W: Write>(rows: &[SummaryRow], mut out: W) -> io::Result<()> {
	writeln!(out, "{}", SUMMARY_HEADER.join(","))?;
	for row in rows {
		let values: Vec<String> = row.values().iter().map(|v| format_number(*v)).collect();
		writeln!(out, "{},{}", csv_field(&row.configuration), values.join(","))?;
	}
	out.flush()
}

/// Shortest round-trip form, always with a fractional part (`0.0`, `25.61`).
pub fn format_number(v: f64) -> String {
	if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 { format!("{v:.1}") } else { format!("{v}") }
}

fn csv_field(s: &str) -> String {
	if s.contains([',', '"', '\n']) { format!("\"{}\"", s.replace('"', "\"\"")) } else { s.to_string() }
}
