//! Parser for `metrics.txt` artifacts.
//!
//! Lines look like `- Throughput: 25.61 tokens/sec`. Anything without a colon,
//! and `===` section headers, is ignored. A line whose key or value is empty
//! after trimming (`: 5`, `Performance Metrics:`) is dropped too, so the record
//! never holds an empty key.

use std::path::Path;

use tracing::trace;

use crate::error::{Error, Result};
use crate::types::{parse_token, MetricRecord, MetricValue};

const SECTION_MARKER: &str = "===";

/// Parse a whole artifact. Never fails: malformed lines are skipped.
pub fn parse(text: &str) -> MetricRecord {
	text.lines().filter_map(parse_line).collect()
}

/// Read and parse an artifact from disk.
pub fn parse_file(path: &Path) -> Result<MetricRecord> {
	let text = std::fs::read_to_string(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
	Ok(parse(&text))
}

/// Parse one line into a key and value, if it is a metric line.
///
/// Numeric values keep only the first token (units are dropped). Anything
/// else keeps the full value text.
///
/// ```rust
/// use ahasd_core::parser::parse_line;
/// use ahasd_core::types::MetricValue;
/// assert_eq!(parse_line("- Energy: 1,024.5 mJ"), Some(("Energy".into(), MetricValue::Number(1024.5))));
/// assert_eq!(parse_line("=== Results ==="), None);
/// ```
pub fn parse_line(line: &str) -> Option<(String, MetricValue)> {
	let line = line.trim();
	if line.is_empty() || line.starts_with(SECTION_MARKER) { return None; }
	let (raw_key, raw_value) = line.split_once(':')?;

	let key = raw_key.trim_matches(['-', ' ']).trim();
	let value = raw_value.trim();
	if key.is_empty() || value.is_empty() { return None; }

	let parsed = value
		.split_whitespace()
		.next()
		.and_then(parse_token)
		.map(MetricValue::Number)
		.unwrap_or_else(|| {
			trace!(key, value, "non-numeric metric kept as text");
			MetricValue::Text(value.to_string())
		});
	Some((key.to_string(), parsed))
}
