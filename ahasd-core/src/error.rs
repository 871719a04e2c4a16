//! Error type shared by the loader, parser and config.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failures raised while loading results or configuration.
///
/// Parse anomalies never surface here: a metric line whose value is not numeric
/// is kept as text by the parser.
#[derive(Debug, Error)]
pub enum Error {
	/// The results root does not exist or is not a directory.
	#[error("results directory '{}' not found", .0.display())]
	MissingRoot(PathBuf),
	/// A discovered artifact could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Read {
		/// Artifact path.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// Directory traversal failed (permissions, vanished entries).
	#[error("failed to walk results tree: {0}")]
	Walk(#[from] walkdir::Error),
	/// Discovery completed but found no run artifacts.
	#[error("no results found under '{}'", .0.display())]
	EmptyResults(PathBuf),
	/// Reading or writing a config file failed.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Config file did not parse or failed validation.
	#[error("config: {0}")]
	Config(String),
}

impl Error {
	/// [`Error::Config`] from any message.
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }

	/// True for fatal input failures: missing root or unreadable artifact.
	pub fn is_missing_input(&self) -> bool {
		matches!(self, Self::MissingRoot(_) | Self::Read { .. } | Self::Walk(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_root_is_missing_input() {
		let err = Error::MissingRoot(PathBuf::from("/nope"));
		assert!(err.is_missing_input());
		assert_eq!(err.to_string(), "results directory '/nope' not found");
	}

	#[test]
	fn empty_results_is_distinct() {
		let err = Error::EmptyResults(PathBuf::from("runs"));
		assert!(!err.is_missing_input());
		assert!(err.to_string().contains("no results found"));
	}

	#[test]
	fn read_error_keeps_source() {
		let err = Error::Read {
			path: PathBuf::from("a/metrics.txt"),
			source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
		};
		assert!(err.is_missing_input());
		assert!(std::error::Error::source(&err).is_some());
		assert!(err.to_string().contains("a/metrics.txt"));
	}
}
