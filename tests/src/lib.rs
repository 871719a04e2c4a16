// Integration test support for the AHASD results analyzer
//
// Builds throwaway results trees on disk in the layout the simulation runner
// produces: one directory per configuration holding `metrics.txt` and,
// optionally, `config.json`.

pub mod test_harness;

pub use test_harness::{init_tracing, metrics_text, ResultsFixture, RunSpec, TestResult};
