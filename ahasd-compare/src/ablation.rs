//! Ablation progression: one model's runs from the baseline through each
//! added feature, normalized to the baseline.

use ahasd_core::{AblationOptions, RunCollection};
use serde::Serialize;

use crate::degrade::{Degradation, Derived};
use crate::table::ComparisonTable;

/// One metric across the progression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AblationSeries {
	/// Series name: the first key of the metric's alias list.
	pub metric: String,
	/// Value of each step, `0.0` where the step has no run or no metric.
	pub raw: Vec<f64>,
	/// Ratios to the first entry, or `raw` unchanged when that entry is not positive.
	pub normalized: Vec<f64>,
	/// Whether `normalized` holds ratios.
	pub normalized_to_baseline: bool,
}

impl AblationSeries {
	fn new(metric: impl Into<String>, raw: Vec<f64>) -> Self {
		let (normalized, normalized_to_baseline) = normalize(&raw);
		Self { metric: metric.into(), raw, normalized, normalized_to_baseline }
	}

	/// Display labels such as `1.00×`, `1.50×`.
	pub fn multiplier_labels(&self) -> Vec<String> {
		self.normalized.iter().map(|v| format!("{v:.2}×")).collect()
	}
}

/// The progression of one model/algorithm prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AblationStudy {
	/// Identifier prefix shared by every step, e.g. `llama2-7b_specdec`.
	pub prefix: String,
	/// Step labels in order.
	pub labels: Vec<String>,
	/// Expected run identifier of each step.
	pub run_ids: Vec<String>,
	/// One series per configured metric.
	pub series: Vec<AblationSeries>,
}

impl AblationStudy {
	/// Series named `metric`.
	pub fn series(&self, metric: &str) -> Option<&AblationSeries> { self.series.iter().find(|s| s.metric == metric) }

	/// Normalized values as a table: one row per step, one column per metric.
	pub fn to_table(&self) -> ComparisonTable {
		let columns = self.series.iter().map(|s| s.metric.clone()).collect();
		let mut table = ComparisonTable::new(format!("Ablation Study: {}", self.prefix), columns);
		for (i, label) in self.labels.iter().enumerate() {
			table.push_row(label.clone(), self.series.iter().map(|s| s.normalized[i]));
		}
		table
	}
}

/// Divide every value by the first one. When the first value is not positive
/// the input is returned unchanged and the flag is `false`.
///
/// ```rust
/// use ahasd_compare::ablation::normalize;
/// assert_eq!(normalize(&[10.0, 15.0]), (vec![1.0, 1.5], true));
/// assert_eq!(normalize(&[0.0, 15.0]), (vec![0.0, 15.0], false));
/// ```
pub fn normalize(values: &[f64]) -> (Vec<f64>, bool) {
	match values.first() {
		Some(&base) if base > 0.0 => (values.iter().map(|v| v / base).collect(), true),
		_ => (values.to_vec(), false),
	}
}

/// Build the progression for the first run (in identifier order) ending with
/// `<delimiter><baseline_suffix>`.
///
/// Returns [`Degradation::NoBaseline`] when no such run exists. Steps with no
/// run read as `0.0` and are reported as [`Degradation::MissingRun`].
pub fn ablation_compare(
	runs: &RunCollection,
	options: &AblationOptions,
	delimiter: &str,
) -> Result<Derived<AblationStudy>, Degradation> {
	let marker = format!("{delimiter}{}", options.baseline_suffix);
	let prefix = runs
		.ids()
		.find_map(|id| id.strip_suffix(marker.as_str()))
		.ok_or_else(|| Degradation::NoBaseline { suffix: options.baseline_suffix.clone() })?
		.to_string();

	let mut warnings = Vec::new();
	let run_ids: Vec<String> = options.steps.iter().map(|s| format!("{prefix}{delimiter}{}", s.suffix)).collect();
	for id in &run_ids {
		if !runs.contains(id) { warnings.push(Degradation::MissingRun { id: id.clone() }); }
	}

	let series: Vec<AblationSeries> = options
		.metrics
		.iter()
		.filter_map(|keys| {
			let name = keys.first()?;
			let raw = run_ids.iter().map(|id| runs.get(id).map_or(0.0, |r| r.first_number_or_zero(keys))).collect();
			Some(AblationSeries::new(name.clone(), raw))
		})
		.collect();
	for s in series.iter().filter(|s| !s.normalized_to_baseline) {
		warnings.push(Degradation::ZeroBaseline { metric: s.metric.clone() });
	}

	let study = AblationStudy {
		prefix,
		labels: options.steps.iter().map(|s| s.label.clone()).collect(),
		run_ids,
		series,
	};
	Ok(Derived::with_warnings(study, warnings))
}
