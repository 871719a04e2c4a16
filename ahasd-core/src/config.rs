//! Analyzer configuration: TOML file, environment overlay, validation.
//!
//! Every metric a derivation reads is an alias list: the first key present
//! with a numeric value wins. Defaults list the analyzer's own names first and
//! the title-cased names written by the single-config runner after them.

use crate::error::{Error, Result};
use crate::loader::DEFAULT_DELIMITER;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

fn keys(k: &[&str]) -> Vec<String> { k.iter().map(|s| s.to_string()).collect() }

fn throughput_keys() -> Vec<String> { keys(&["Throughput", "Throughput Tokens Per Sec"]) }

fn efficiency_keys() -> Vec<String> { keys(&["Energy Efficiency", "Energy Efficiency Tokens Per Mj"]) }

/// Analyzer settings: logging, identifier delimiter, and the metric names
/// and suffixes each derivation looks for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
	/// `trace`, `debug`, `info`, `warn` or `error`.
	pub log_level: String,
	/// Joins path components into identifiers and separates identifier segments.
	pub delimiter: String,
	/// Output directory name created under the results root.
	pub plots_dir: String,
	/// Model × config comparison.
	pub grouped: GroupedOptions,
	/// Baseline vs. variant comparison.
	pub paired: PairedOptions,
	/// Feature progression.
	pub ablation: AblationOptions,
	/// Summary export columns.
	pub summary: SummaryColumns,
}

impl Default for AnalyzerConfig {
	fn default() -> Self {
		Self {
			log_level: "info".into(),
			delimiter: DEFAULT_DELIMITER.into(),
			plots_dir: "plots".into(),
			grouped: GroupedOptions::default(),
			paired: PairedOptions::default(),
			ablation: AblationOptions::default(),
			summary: SummaryColumns::default(),
		}
	}
}

/// Grouped comparison settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroupedOptions {
	/// Metric aliases; the first one also names the table.
	pub metric: Vec<String>,
}

impl Default for GroupedOptions {
	fn default() -> Self { Self { metric: throughput_keys() } }
}

/// Baseline vs. variant pairing by identifier suffix.
///
/// Suffixes are bare segments; the identifier delimiter is put in front of
/// them when matching, so `baseline` matches `llama_specdec_baseline` with `_`
/// and `llama/specdec/baseline` with `/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PairedOptions {
	/// Suffix of the reference side.
	pub left_suffix: String,
	/// Suffix of the variant side.
	pub right_suffix: String,
	/// Metric aliases; the first one also names the table.
	pub metric: Vec<String>,
	/// Column label of the reference side.
	pub left_label: String,
	/// Column label of the variant side.
	pub right_label: String,
}

impl Default for PairedOptions {
	fn default() -> Self {
		Self {
			left_suffix: "baseline".into(),
			right_suffix: "ahasd_full".into(),
			metric: efficiency_keys(),
			left_label: "Baseline".into(),
			right_label: "AHASD Full".into(),
		}
	}
}

impl PairedOptions {
	/// Options labelled by the suffixes themselves.
	/// Options reading exactly `metric`, labelled by the suffixes themselves.
	pub fn new(left_suffix: impl Into<String>, right_suffix: impl Into<String>, metric: impl Into<String>) -> Self {
		let (left_suffix, right_suffix) = (left_suffix.into(), right_suffix.into());
		Self {
			left_label: left_suffix.clone(),
			right_label: right_suffix.clone(),
			left_suffix,
			right_suffix,
			metric: vec![metric.into()],
		}
	}
}

/// One step of the ablation progression.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AblationStep {
	/// Final identifier segment(s) of the step's run.
	pub suffix: String,
	/// Display label.
	pub label: String,
}

impl AblationStep {
	/// Step for runs ending in `suffix`, displayed as `label`.
	pub fn new(suffix: impl Into<String>, label: impl Into<String>) -> Self {
		Self { suffix: suffix.into(), label: label.into() }
	}
}

/// Ordered feature progression; the first step is the normalization reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AblationOptions {
	/// Suffix locating the reference run.
	pub baseline_suffix: String,
	/// One alias list per series; the first key names the series.
	pub metrics: Vec<Vec<String>>,
	/// Steps in display order.
	pub steps: Vec<AblationStep>,
}

impl Default for AblationOptions {
	fn default() -> Self {
		Self {
			baseline_suffix: "baseline".into(),
			metrics: vec![throughput_keys(), efficiency_keys()],
			steps: vec![
				AblationStep::new("baseline", "Baseline"),
				AblationStep::new("npu_pim", "NPU+PIM"),
				AblationStep::new("npu_pim_aau", "+AAU"),
				AblationStep::new("npu_pim_aau_edc", "+EDC"),
				AblationStep::new("ahasd_full", "+TVC (Full)"),
			],
		}
	}
}

/// Metric keys read for each summary column; the first numeric key present wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummaryColumns {
	/// `Throughput (tokens/s)`
	pub throughput: Vec<String>,
	/// `Energy (mJ)`
	pub energy: Vec<String>,
	/// `Energy Efficiency (tokens/mJ)`
	pub energy_efficiency: Vec<String>,
	/// `Draft Acceptance Rate (%)`
	pub acceptance_rate: Vec<String>,
	/// `EDC Accuracy (%)`
	pub edc_accuracy: Vec<String>,
	/// `TVC Success Rate (%)`
	pub tvc_success_rate: Vec<String>,
}

impl Default for SummaryColumns {
	fn default() -> Self {
		Self {
			throughput: throughput_keys(),
			energy: keys(&["Energy", "Energy Mj"]),
			energy_efficiency: efficiency_keys(),
			acceptance_rate: keys(&["Total Drafts Accepted", "Acceptance Rate"]),
			edc_accuracy: keys(&["Prediction Accuracy"]),
			tvc_success_rate: keys(&["Success Rate"]),
		}
	}
}

impl AnalyzerConfig {
	/// Read and validate a TOML file. Missing keys take their defaults.
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let data = fs::read_to_string(path)?;
		let cfg: Self = toml::from_str(&data).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
		cfg.validate()?;
		Ok(cfg)
	}

	/// Overlay `AHASD_LOG_LEVEL` and `AHASD_DELIMITER` when set.
	pub fn apply_env(&mut self) {
		if let Ok(v) = std::env::var("AHASD_LOG_LEVEL") { if !v.trim().is_empty() { self.log_level = v.trim().to_string(); } }
		if let Ok(v) = std::env::var("AHASD_DELIMITER") { if !v.is_empty() { self.delimiter = v; } }
	}

	/// Reject settings no derivation can work with.
	pub fn validate(&self) -> Result<()> {
		let allowed = ["trace", "debug", "info", "warn", "error"];
		if !allowed.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		if self.delimiter.is_empty() {
			return Err(Error::config("delimiter must not be empty"));
		}
		if self.plots_dir.trim().is_empty() {
			return Err(Error::config("plots_dir must not be empty"));
		}
		if self.ablation.steps.is_empty() {
			return Err(Error::config("ablation.steps must list at least the baseline"));
		}
		for (name, suffix) in [("paired.left_suffix", &self.paired.left_suffix), ("paired.right_suffix", &self.paired.right_suffix)] {
			if suffix.is_empty() {
				return Err(Error::config(format!("{name} must not be empty")));
			}
			if suffix.starts_with(self.delimiter.as_str()) {
				return Err(Error::config(format!("{name} '{suffix}' must not start with the delimiter '{}'", self.delimiter)));
			}
		}
		let alias_lists = [("grouped.metric", &self.grouped.metric), ("paired.metric", &self.paired.metric)];
		if let Some((name, _)) = alias_lists.iter().find(|(_, k)| k.is_empty()) {
			return Err(Error::config(format!("{name} must list at least one key")));
		}
		if self.ablation.metrics.iter().any(Vec::is_empty) {
			return Err(Error::config("ablation.metrics entries must list at least one key"));
		}
		Ok(())
	}

	/// Pretty TOML rendering, as written by `config write-template`.
	pub fn to_toml_string(&self) -> Result<String> {
		toml::to_string_pretty(self).map_err(|e| Error::config(format!("toml encode error: {e}")))
	}

	/// Write the config as a TOML template.
	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		fs::write(path, self.to_toml_string()?)?;
		Ok(())
	}
}
