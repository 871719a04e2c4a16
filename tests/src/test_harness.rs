// Test harness for AHASD integration tests
//
// Provides:
// - Temporary results roots cleaned up on drop
// - Runner-style metrics.txt rendering (section headers, "- Key: value unit")
// - Optional config.json next to each run

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::debug;

/// Test result type alias
pub type TestResult<T> = Result<T>;

/// Install a test-friendly subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// One simulated run: where it lives and what it reports.
#[derive(Debug, Clone, Default)]
pub struct RunSpec {
    /// Directory relative to the results root, `/`-separated.
    pub rel_dir: String,
    /// `(key, value text)` pairs, written as `- key: value`.
    pub metrics: Vec<(String, String)>,
    pub config: Option<serde_json::Value>,
}

impl RunSpec {
    pub fn new(rel_dir: impl Into<String>) -> Self {
        Self { rel_dir: rel_dir.into(), ..Self::default() }
    }

    pub fn metric(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metrics.push((key.into(), value.to_string()));
        self
    }

    pub fn config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// Render metrics the way the runner does.
pub fn metrics_text(title: &str, metrics: &[(String, String)]) -> String {
    let mut out = format!("=== {title} ===\nConfiguration: {title}\n\nPerformance Metrics:\n");
    for (k, v) in metrics {
        out.push_str(&format!("- {k}: {v}\n"));
    }
    out
}

/// A results root in a temporary directory.
pub struct ResultsFixture {
    dir: TempDir,
}

impl ResultsFixture {
    pub fn new() -> Result<Self> {
        Ok(Self { dir: tempfile::tempdir().context("creating results root")? })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write one run; returns the directory it landed in.
    pub fn add_run(&self, spec: &RunSpec) -> Result<PathBuf> {
        let dir = spec.rel_dir.split('/').fold(self.root().to_path_buf(), |p, c| p.join(c));
        std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        std::fs::write(dir.join("metrics.txt"), metrics_text(&spec.rel_dir, &spec.metrics))?;
        if let Some(cfg) = &spec.config {
            std::fs::write(dir.join("config.json"), serde_json::to_vec_pretty(cfg)?)?;
        }
        debug!(run = %spec.rel_dir, "fixture run written");
        Ok(dir)
    }
}
