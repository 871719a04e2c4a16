//! Run data model: metric values, per-run records, and the run collection.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

/// Key under which a run's `config.json` is stored.
pub const RESERVED_CONFIG_KEY: &str = "config";

#[allow(clippy::expect_used)]
static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)$").expect("numeric pattern"));

/// Parse one value token: strip parentheses, percent signs, and thousands separators,
/// then accept it only if it is a plain decimal number.
pub fn parse_token(token: &str) -> Option<f64> {
	let cleaned: String = token.chars().filter(|c| !matches!(c, '(' | ')' | '%' | ',')).collect();
	if !NUMERIC.is_match(&cleaned) { return None; }
	cleaned.parse::<f64>().ok()
}

/// Coerce free text to a number using its first whitespace-delimited token.
///
/// ```rust
/// use ahasd_core::types::coerce_f64;
/// assert_eq!(coerce_f64("25.61 tokens/sec"), Some(25.61));
/// assert_eq!(coerce_f64("(74.5%)"), Some(74.5));
/// assert_eq!(coerce_f64("analytical_model"), None);
/// ```
pub fn coerce_f64(text: &str) -> Option<f64> {
	text.split_whitespace().next().and_then(parse_token)
}

/// Scalar produced by the metric parser.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
	/// Parsed from the first value token.
	Number(f64),
	/// Trimmed full value when the first token is not numeric.
	Text(String),
}

impl MetricValue {
	/// Numeric view of the value; text goes through [`coerce_f64`].
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(v) => Some(*v),
			Self::Text(s) => coerce_f64(s),
		}
	}

}

impl fmt::Display for MetricValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(v) => write!(f, "{v}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

impl Serialize for MetricValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Number(v) => serializer.serialize_f64(*v),
			Self::Text(s) => serializer.serialize_str(s),
		}
	}
}

impl From<f64> for MetricValue {
	fn from(v: f64) -> Self { Self::Number(v) }
}

impl From<&str> for MetricValue {
	fn from(s: &str) -> Self { Self::Text(s.to_string()) }
}

/// Metric name to value mapping for one artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricRecord {
	entries: BTreeMap<String, MetricValue>,
}

#[allow(missing_docs)]
impl MetricRecord {
	pub fn new() -> Self { Self::default() }

	/// Insert or replace `key`; returns the replaced value.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Option<MetricValue> {
		self.entries.insert(key.into(), value.into())
	}

	pub fn remove(&mut self, key: &str) -> Option<MetricValue> { self.entries.remove(key) }

	pub fn get(&self, key: &str) -> Option<&MetricValue> { self.entries.get(key) }

	/// Numeric value of `key`, if present and coercible.
	pub fn number(&self, key: &str) -> Option<f64> { self.get(key).and_then(MetricValue::as_f64) }

	/// First of `keys` that is present and numeric.
	pub fn first_number<S: AsRef<str>>(&self, keys: &[S]) -> Option<f64> {
		keys.iter().find_map(|k| self.number(k.as_ref()))
	}

	pub fn contains_key(&self, key: &str) -> bool { self.entries.contains_key(key) }

	pub fn len(&self) -> usize { self.entries.len() }

	pub fn is_empty(&self) -> bool { self.entries.is_empty() }

	pub fn iter(&self) -> btree_map::Iter<'_, String, MetricValue> { self.entries.iter() }
}

impl FromIterator<(String, MetricValue)> for MetricRecord {
	fn from_iter<I: IntoIterator<Item = (String, MetricValue)>>(iter: I) -> Self {
		Self { entries: iter.into_iter().collect() }
	}
}

/// Parsed metrics of one run plus its optional structured configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunRecord {
	#[serde(flatten)]
	/// Parsed `metrics.txt`.
	pub metrics: MetricRecord,
	/// Parsed `config.json`, if present and valid.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub config: Option<serde_json::Value>,
}

impl RunRecord {
	/// Run without a config document.
	pub fn new(metrics: MetricRecord) -> Self { Self { metrics, config: None } }

	/// Attach a config document. Any metric named like the reserved key is replaced.
	pub fn attach_config(&mut self, config: serde_json::Value) {
		self.metrics.remove(RESERVED_CONFIG_KEY);
		self.config = Some(config);
	}

	/// See [`MetricRecord::number`].
	pub fn number(&self, key: &str) -> Option<f64> { self.metrics.number(key) }

	/// First numeric value among `keys`, `0.0` when none is present.
	pub fn first_number_or_zero<S: AsRef<str>>(&self, keys: &[S]) -> f64 { self.metrics.first_number(keys).unwrap_or(0.0) }
}

/// All runs of one invocation, keyed by configuration identifier.
///
/// Iteration is lexicographic by identifier, so every "first match" lookup over
/// the collection is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RunCollection {
	runs: BTreeMap<String, RunRecord>,
}

#[allow(missing_docs)]
impl RunCollection {
	pub fn new() -> Self { Self::default() }

	/// Insert a run; an existing run with the same identifier is replaced and returned.
	pub fn insert(&mut self, id: impl Into<String>, run: RunRecord) -> Option<RunRecord> {
		self.runs.insert(id.into(), run)
	}

	pub fn get(&self, id: &str) -> Option<&RunRecord> { self.runs.get(id) }

	pub fn contains(&self, id: &str) -> bool { self.runs.contains_key(id) }

	pub fn len(&self) -> usize { self.runs.len() }

	pub fn is_empty(&self) -> bool { self.runs.is_empty() }

	pub fn ids(&self) -> impl Iterator<Item = &str> { self.runs.keys().map(String::as_str) }

	pub fn iter(&self) -> btree_map::Iter<'_, String, RunRecord> { self.runs.iter() }

	/// Turn an empty collection into [`crate::Error::EmptyResults`].
	pub fn require_results(self, root: &std::path::Path) -> crate::Result<Self> {
		if self.is_empty() {
			return Err(crate::Error::EmptyResults(root.to_path_buf()));
		}
		Ok(self)
	}
}

impl<'a> IntoIterator for &'a RunCollection {
	type Item = (&'a String, &'a RunRecord);
	type IntoIter = btree_map::Iter<'a, String, RunRecord>;
	fn into_iter(self) -> Self::IntoIter { self.runs.iter() }
}

impl FromIterator<(String, RunRecord)> for RunCollection {
	fn from_iter<I: IntoIterator<Item = (String, RunRecord)>>(iter: I) -> Self {
		let mut out = Self::new();
		for (id, run) in iter { out.insert(id, run); }
		out
	}
}
