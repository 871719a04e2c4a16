//! Output writers for a finished [`Report`].
//!
//! Each writer runs on its own; a failure is recorded and the remaining
//! outputs are still written.

use std::path::{Path, PathBuf};

use ahasd_compare::{summary, AblationStudy, ComparisonTable, Report};
use anyhow::Context;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde_json::json;
use tracing::{info, warn};

/// One output file derived from the report.
pub trait OutputWriter {
	fn file_name(&self) -> &'static str;
	/// Encoded contents, or `None` when the report has nothing for this output.
	fn render(&self, report: &Report) -> anyhow::Result<Option<Vec<u8>>>;
}

pub struct SummaryCsv;
pub struct GroupedJson;
pub struct PairedJson;
pub struct AblationJson;
pub struct ReportManifest;

impl OutputWriter for SummaryCsv {
	fn file_name(&self) -> &'static str { "summary_table.csv" }
	fn render(&self, report: &Report) -> anyhow::Result<Option<Vec<u8>>> {
		let mut buf = Vec::new();
		summary::write_csv(&report.summary, &mut buf)?;
		Ok(Some(buf))
	}
}

impl OutputWriter for GroupedJson {
	fn file_name(&self) -> &'static str { "throughput_comparison.json" }
	fn render(&self, report: &Report) -> anyhow::Result<Option<Vec<u8>>> {
		Ok(Some(serde_json::to_vec_pretty(&report.grouped)?))
	}
}

impl OutputWriter for PairedJson {
	fn file_name(&self) -> &'static str { "energy_efficiency.json" }
	fn render(&self, report: &Report) -> anyhow::Result<Option<Vec<u8>>> {
		Ok(Some(serde_json::to_vec_pretty(&report.paired)?))
	}
}

impl OutputWriter for AblationJson {
	fn file_name(&self) -> &'static str { "ablation_study.json" }
	fn render(&self, report: &Report) -> anyhow::Result<Option<Vec<u8>>> {
		let Ok(derived) = &report.ablation else { return Ok(None) };
		let study = &derived.output;
		let doc = json!({
			"prefix": study.prefix,
			"labels": study.labels,
			"run_ids": study.run_ids,
			"series": study.series.iter().map(|s| json!({
				"metric": s.metric,
				"raw": s.raw,
				"normalized": s.normalized,
				"normalized_to_baseline": s.normalized_to_baseline,
				"multipliers": s.multiplier_labels(),
			})).collect::<Vec<_>>(),
			"table": study.to_table(),
			"warnings": derived.warnings,
		});
		Ok(Some(serde_json::to_vec_pretty(&doc)?))
	}
}

impl OutputWriter for ReportManifest {
	fn file_name(&self) -> &'static str { "report.json" }
	fn render(&self, report: &Report) -> anyhow::Result<Option<Vec<u8>>> {
		let doc = json!({
			"generated_at": chrono::Utc::now().to_rfc3339(),
			"configurations": report.runs,
			"ablation_available": report.ablation.is_ok(),
			"warnings": report.warnings(),
		});
		Ok(Some(serde_json::to_vec_pretty(&doc)?))
	}
}

pub fn default_writers() -> Vec<Box<dyn OutputWriter>> {
	vec![Box::new(GroupedJson), Box::new(PairedJson), Box::new(AblationJson), Box::new(SummaryCsv), Box::new(ReportManifest)]
}

#[derive(Debug, Default)]
pub struct WriteOutcome {
	pub written: Vec<PathBuf>,
	pub skipped: Vec<&'static str>,
	pub failed: Vec<(&'static str, String)>,
}

/// Run every writer into `dir`, recording rather than propagating failures.
pub fn write_outputs(report: &Report, dir: &Path, writers: &[Box<dyn OutputWriter>]) -> WriteOutcome {
	let mut outcome = WriteOutcome::default();
	for w in writers {
		let path = dir.join(w.file_name());
		let res = w.render(report).and_then(|bytes| match bytes {
			Some(b) => std::fs::write(&path, b).with_context(|| format!("writing {}", path.display())).map(|_| true),
			None => Ok(false),
		});
		match res {
			Ok(true) => {
				info!("saved {}", w.file_name());
				outcome.written.push(path);
			}
			Ok(false) => {
				warn!("skipped {}: nothing to write", w.file_name());
				outcome.skipped.push(w.file_name());
			}
			Err(e) => {
				warn!("error generating {}: {e:#}", w.file_name());
				outcome.failed.push((w.file_name(), format!("{e:#}")));
			}
		}
	}
	outcome
}

// ---------------- console tables -----------------

pub fn comparison_table(t: &ComparisonTable) -> Table {
	let mut table = Table::new();
	let mut header = vec![Cell::new("").fg(Color::Cyan)];
	header.extend(t.column_labels.iter().map(|c| Cell::new(c).fg(Color::Cyan)));
	table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic).set_header(header);
	for row in &t.rows {
		let mut cells = vec![Cell::new(&row.label)];
		cells.extend(row.cells.iter().map(|c| Cell::new(format!("{:.3}", c.value))));
		table.add_row(cells);
	}
	table
}

pub fn ablation_table(study: &AblationStudy) -> Table {
	let mut table = Table::new();
	let mut header = vec![Cell::new("Configuration").fg(Color::Cyan)];
	header.extend(study.series.iter().map(|s| Cell::new(&s.metric).fg(Color::Cyan)));
	table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic).set_header(header);
	let labels: Vec<Vec<String>> = study.series.iter().map(|s| s.multiplier_labels()).collect();
	for (i, label) in study.labels.iter().enumerate() {
		let mut cells = vec![Cell::new(label)];
		cells.extend(labels.iter().map(|l| Cell::new(&l[i])));
		table.add_row(cells);
	}
	table
}

pub fn summary_table(rows: &[ahasd_compare::SummaryRow]) -> Table {
	let mut table = Table::new();
	table
		.load_preset(UTF8_FULL)
		.set_content_arrangement(ContentArrangement::Dynamic)
		.set_header(summary::SUMMARY_HEADER.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect::<Vec<_>>());
	for row in rows {
		let mut cells = vec![Cell::new(&row.configuration)];
		cells.extend(row.values().iter().map(|v| Cell::new(summary::format_number(*v))));
		table.add_row(cells);
	}
	table
}
