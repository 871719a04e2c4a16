//! Baseline vs. variant comparison of one metric.

use ahasd_core::{PairedOptions, RunCollection};

use crate::degrade::{Degradation, Derived};
use crate::table::ComparisonTable;

/// Pair every `<prefix><d><left_suffix>` run with `<prefix><d><right_suffix>`
/// and report `options.metric` for both sides, one row per prefix.
///
/// Left runs without a sibling are skipped and reported as
/// [`Degradation::UnmatchedPair`]. Missing or non-numeric values read as `0.0`.
pub fn paired_compare(runs: &RunCollection, options: &PairedOptions, delimiter: &str) -> Derived<ComparisonTable> {
	let title = options.metric.first().map_or("Metric", String::as_str);
	let mut table = ComparisonTable::new(
		format!("{title} Comparison"),
		vec![options.left_label.clone(), options.right_label.clone()],
	);
	let left_marker = format!("{delimiter}{}", options.left_suffix);
	let mut warnings = Vec::new();

	for (id, left) in runs {
		let Some(prefix) = id.strip_suffix(left_marker.as_str()) else { continue };
		let sibling = format!("{prefix}{delimiter}{}", options.right_suffix);
		match runs.get(&sibling) {
			Some(right) => {
				table.push_row(prefix, [left.first_number_or_zero(&options.metric), right.first_number_or_zero(&options.metric)]);
			}
			None => warnings.push(Degradation::UnmatchedPair { left: id.clone(), expected: sibling }),
		}
	}
	Derived::with_warnings(table, warnings)
}
