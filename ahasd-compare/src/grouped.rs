//! Model × configuration comparison of one metric.
//!
//! Identifiers are read as `<model><d><algorithm><d><config...>`. Identifiers
//! with fewer than three segments take no part in the grouping.

use std::collections::BTreeSet;

use ahasd_core::{GroupedOptions, RunCollection};

use crate::degrade::{Degradation, Derived};
use crate::table::ComparisonTable;

/// Split an identifier into its model and config dimensions.
///
/// ```rust
/// use ahasd_compare::grouped::split_identifier;
/// assert_eq!(split_identifier("llama2-7b_specdec_npu_pim", "_"), Some(("llama2-7b", "npu_pim".to_string())));
/// assert_eq!(split_identifier("llama2_specdec", "_"), None);
/// ```
pub fn split_identifier<'a>(id: &'a str, delimiter: &str) -> Option<(&'a str, String)> {
	let parts: Vec<&str> = id.split(delimiter).collect();
	if parts.len() < 3 { return None; }
	Some((parts[0], parts[2..].join(delimiter)))
}

/// One row per model, one column per config, cells holding `options.metric`.
///
/// A cell reads the first run (in identifier order) whose identifier starts
/// with the model string and ends with the config string. Both are plain string
/// tests, so model `opt` also matches `opt-1b_svip_baseline`, and that run wins
/// over `opt_svip_baseline` because it sorts first. With no such run the cell
/// is `0.0` and a [`Degradation::MissingRun`] is recorded; a matching run
/// without the metric also reads `0.0`, silently.
pub fn grouped_compare(runs: &RunCollection, options: &GroupedOptions, delimiter: &str) -> Derived<ComparisonTable> {
	let mut models = BTreeSet::new();
	let mut configs = BTreeSet::new();
	for id in runs.ids() {
		if let Some((model, config)) = split_identifier(id, delimiter) {
			models.insert(model.to_string());
			configs.insert(config);
		}
	}

	let title = options.metric.first().map_or("Metric", String::as_str);
	let mut table = ComparisonTable::new(format!("{title} Comparison"), configs.iter().cloned().collect());
	let mut warnings = Vec::new();
	for model in &models {
		let values: Vec<f64> = configs
			.iter()
			.map(|config| {
				match runs.iter().find(|(id, _)| id.starts_with(model.as_str()) && id.ends_with(config.as_str())) {
					Some((_, run)) => run.first_number_or_zero(&options.metric),
					None => {
						warnings.push(Degradation::MissingRun { id: format!("{model}{delimiter}*{delimiter}{config}") });
						0.0
					}
				}
			})
			.collect();
		table.push_row(model.clone(), values);
	}
	Derived::with_warnings(table, warnings)
}
