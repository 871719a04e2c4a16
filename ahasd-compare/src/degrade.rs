//! Locally recovered derivation problems.
//!
//! A comparison that cannot find a baseline, a sibling run, or a usable
//! normalization denominator still produces output; what it had to skip is
//! reported here and logged as a warning by the caller.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// A problem a derivation recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
	/// No identifier ends with the baseline suffix.
	#[error("no baseline found (suffix '{suffix}')")]
	NoBaseline {
		/// Configured baseline suffix.
		suffix: String,
	},
	/// A left-hand run has no right-hand sibling; the row was skipped.
	#[error("'{left}' has no counterpart '{expected}'")]
	UnmatchedPair {
		/// Identifier of the left-hand run.
		left: String,
		/// Sibling identifier that was looked up.
		expected: String,
	},
	/// No run exists for a grouped (model, config) cell or an ablation step.
	#[error("no run for '{id}'; using 0.0")]
	MissingRun {
		/// Expected identifier, or a `model_*_config` pattern for grouped cells.
		id: String,
	},
	/// Baseline value is zero or absent; raw values were kept.
	#[error("baseline {metric} is zero or missing; normalization skipped")]
	ZeroBaseline {
		/// Series name.
		metric: String,
	},
}

/// Output of one derivation plus what it had to skip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derived<T> {
	/// The derived value, complete as far as the data allowed.
	pub output: T,
	/// What had to be skipped or substituted, in discovery order.
	pub warnings: Vec<Degradation>,
}

impl<T> Derived<T> {
	/// Output together with the problems met while deriving it.
	pub fn with_warnings(output: T, warnings: Vec<Degradation>) -> Self { Self { output, warnings } }

	/// True when anything was skipped or substituted.
	pub fn is_degraded(&self) -> bool { !self.warnings.is_empty() }

	/// Emit each warning through `tracing`, tagged with the derivation name.
	pub fn log_warnings(&self, derivation: &str) {
		for w in &self.warnings {
			warn!(derivation, "{w}");
		}
	}
}
