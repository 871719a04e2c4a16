//! Discovery of run artifacts under a results root.
//!
//! Each directory holding a `metrics.txt` is one run. Its identifier is the
//! directory path relative to the root, components joined with the configured
//! delimiter. A sibling `config.json` is attached when it parses.
//!
//! Discovery order is sorted, so collisions (two directories mapping to the
//! same identifier) resolve last-write-wins in lexicographic path order.
//!
//! Symbolic links are not followed: a `metrics.txt` that is a link, or that
//! sits under a linked directory, is not discovered.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::parser;
use crate::types::{RunCollection, RunRecord};

/// Artifact file name searched for during discovery.
pub const METRICS_FILE: &str = "metrics.txt";
/// Optional structured configuration next to each artifact.
pub const CONFIG_FILE: &str = "config.json";
/// Default identifier delimiter.
pub const DEFAULT_DELIMITER: &str = "_";

/// Loads a results tree into a [`RunCollection`].
#[derive(Debug, Clone)]
pub struct RunLoader {
	delimiter: String,
}

impl Default for RunLoader {
	fn default() -> Self { Self::new(DEFAULT_DELIMITER) }
}

impl RunLoader {
	/// Loader joining path components with `delimiter`.
	pub fn new(delimiter: impl Into<String>) -> Self { Self { delimiter: delimiter.into() } }

	/// Every `metrics.txt` under `root`, sorted by path.
	pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
		if !root.is_dir() { return Err(Error::MissingRoot(root.to_path_buf())); }
		let mut found = Vec::new();
		for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
			let entry = entry?;
			if entry.file_type().is_file() && entry.file_name() == METRICS_FILE {
				found.push(entry.into_path());
			}
		}
		found.sort();
		debug!(root = %root.display(), count = found.len(), "discovered metric artifacts");
		Ok(found)
	}

	/// Discover and load every run under `root`.
	///
	/// An empty root yields an empty collection; use
	/// [`RunCollection::require_results`] to turn that into an error.
	pub fn load(&self, root: &Path) -> Result<RunCollection> {
		let paths = self.discover(root)?;
		let runs = self.load_paths(root, paths)?;
		info!(root = %root.display(), configurations = runs.len(), "loaded results");
		Ok(runs)
	}

	/// Load the given artifacts in the given order; later paths overwrite
	/// earlier ones that share an identifier.
	pub fn load_paths<I>(&self, root: &Path, paths: I) -> Result<RunCollection>
	where
		I: IntoIterator<Item = PathBuf>,
	{
		let mut runs = RunCollection::new();
		for path in paths {
			let Some(id) = self.config_id(root, &path) else {
				debug!(path = %path.display(), "skipping artifact at results root");
				continue;
			};
			let mut run = RunRecord::new(parser::parse_file(&path)?);
			if let Some(cfg) = path.parent().and_then(read_config) {
				run.attach_config(cfg);
			}
			debug!(id = %id, metrics = run.metrics.len(), "loaded run");
			if runs.insert(id.clone(), run).is_some() {
				warn!(id = %id, path = %path.display(), "duplicate configuration identifier; keeping later artifact");
			}
		}
		Ok(runs)
	}

	/// Identifier for an artifact, or `None` when it sits directly in `root`.
	pub fn config_id(&self, root: &Path, artifact: &Path) -> Option<String> {
		let dir = artifact.parent()?;
		let rel = dir.strip_prefix(root).ok()?;
		let parts: Vec<String> = rel
			.components()
			.filter_map(|c| match c {
				Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
				_ => None,
			})
			.collect();
		if parts.is_empty() { return None; }
		Some(parts.join(&self.delimiter))
	}
}

/// Load every run under `root` with the default delimiter.
pub fn load(root: &Path) -> Result<RunCollection> {
	RunLoader::default().load(root)
}

fn read_config(dir: &Path) -> Option<serde_json::Value> {
	let path = dir.join(CONFIG_FILE);
	let text = match std::fs::read_to_string(&path) {
		Ok(t) => t,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
		Err(e) => {
			warn!(path = %path.display(), error = %e, "unreadable config; continuing without it");
			return None;
		}
	};
	match serde_json::from_str(&text) {
		Ok(v) => Some(v),
		Err(e) => {
			warn!(path = %path.display(), error = %e, "invalid config JSON; continuing without it");
			None
		}
	}
}
