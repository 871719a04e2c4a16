//! End-to-end: results tree on disk -> loader -> derivations.

use ahasd_compare::{export_summary, normalize, paired_compare, Degradation, Report};
use ahasd_core::{AnalyzerConfig, MetricValue, PairedOptions, RunLoader};
use ahasd_integration_tests::{init_tracing, ResultsFixture, RunSpec, TestResult};
use serde_json::json;

fn runner_style(rel_dir: &str, throughput: f64, efficiency: f64) -> RunSpec {
    RunSpec::new(rel_dir)
        .metric("Throughput", format!("{throughput} tokens/sec"))
        .metric("Energy", "1,432.5 mJ")
        .metric("Energy Efficiency", format!("{efficiency} tokens/mJ"))
        .metric("Simulation Type", "analytical_model")
}

fn full_progression(fx: &ResultsFixture, model: &str) -> TestResult<()> {
    let steps = [("baseline", 10.0, 0.2), ("npu_pim", 22.0, 0.4), ("npu_pim_aau", 26.0, 0.5), ("npu_pim_aau_edc", 30.0, 0.6), ("ahasd_full", 33.0, 0.7)];
    for (suffix, tp, ee) in steps {
        fx.add_run(&runner_style(&format!("{model}_specdec_{suffix}"), tp, ee))?;
    }
    Ok(())
}

#[test]
fn full_workflow_over_runner_layout() -> TestResult<()> {
    init_tracing();
    let fx = ResultsFixture::new()?;
    full_progression(&fx, "llama2-7b")?;
    fx.add_run(&runner_style("opt-1b_svip_baseline", 5.0, 0.1).config(json!({"algorithm": "svip"})))?;

    let runs = RunLoader::default().load(fx.root())?.require_results(fx.root())?;
    assert_eq!(runs.len(), 6);
    let base = runs.get("llama2-7b_specdec_baseline").expect("baseline loaded");
    assert_eq!(base.number("Throughput"), Some(10.0));
    assert_eq!(base.number("Energy"), Some(1432.5));
    assert_eq!(base.metrics.get("Simulation Type"), Some(&MetricValue::from("analytical_model")));
    assert_eq!(runs.get("opt-1b_svip_baseline").and_then(|r| r.config.clone()), Some(json!({"algorithm": "svip"})));

    let report = Report::build(&runs, &AnalyzerConfig::default());

    let grouped = &report.grouped.output;
    assert_eq!(grouped.row_labels, vec!["llama2-7b", "opt-1b"]);
    assert_eq!(grouped.value("llama2-7b", "npu_pim_aau"), Some(26.0));
    assert_eq!(grouped.value("opt-1b", "baseline"), Some(5.0));
    assert_eq!(grouped.value("opt-1b", "ahasd_full"), Some(0.0));

    let paired = &report.paired;
    assert_eq!(paired.output.row_labels, vec!["llama2-7b_specdec"]);
    assert_eq!(paired.output.value("llama2-7b_specdec", "AHASD Full"), Some(0.7));
    assert_eq!(
        paired.warnings,
        vec![Degradation::UnmatchedPair { left: "opt-1b_svip_baseline".into(), expected: "opt-1b_svip_ahasd_full".into() }]
    );

    let ablation = report.ablation.as_ref().expect("baseline present");
    assert_eq!(ablation.output.prefix, "llama2-7b_specdec");
    let tp = ablation.output.series("Throughput").expect("throughput series");
    assert_eq!(tp.normalized, vec![1.0, 2.2, 2.6, 3.0, 3.3]);
    assert!(ablation.warnings.is_empty());

    assert_eq!(report.summary.len(), runs.len());
    Ok(())
}

#[test]
fn nested_directories_address_the_same_runs() -> TestResult<()> {
    let fx = ResultsFixture::new()?;
    fx.add_run(&runner_style("modelA/algo/baseline", 10.0, 0.2))?;
    fx.add_run(&runner_style("modelA/algo/ahasd_full", 15.0, 0.3))?;
    let runs = RunLoader::default().load(fx.root())?;
    let d = paired_compare(&runs, &PairedOptions::new("baseline", "ahasd_full", "Throughput"), "_");
    assert_eq!(d.output.len(), 1);
    assert_eq!(d.output.value("modelA_algo", "ahasd_full"), Some(15.0));
    Ok(())
}

#[test]
fn pairing_requires_both_sides() -> TestResult<()> {
    let fx = ResultsFixture::new()?;
    fx.add_run(&runner_style("modelA_algo_baseline", 10.0, 0.2))?;
    let runs = RunLoader::default().load(fx.root())?;
    let opts = PairedOptions::new("baseline", "ahasd_full", "Throughput");
    assert!(paired_compare(&runs, &opts, "_").output.is_empty());

    fx.add_run(&runner_style("modelA_algo_ahasd_full", 12.0, 0.2))?;
    let runs = RunLoader::default().load(fx.root())?;
    let d = paired_compare(&runs, &opts, "_");
    assert_eq!(d.output.len(), 1);
    assert_eq!(d.output.value("modelA_algo", "baseline"), Some(10.0));
    assert_eq!(d.output.value("modelA_algo", "ahasd_full"), Some(12.0));
    Ok(())
}

#[test]
fn empty_root_is_a_distinct_condition() -> TestResult<()> {
    let fx = ResultsFixture::new()?;
    let runs = RunLoader::default().load(fx.root())?;
    assert!(runs.is_empty());
    let err = runs.require_results(fx.root()).unwrap_err();
    assert!(matches!(err, ahasd_core::Error::EmptyResults(_)));
    assert!(!err.is_missing_input());
    Ok(())
}

#[test]
fn summary_covers_runs_missing_every_metric() -> TestResult<()> {
    let fx = ResultsFixture::new()?;
    fx.add_run(&RunSpec::new("bare_run_x").metric("Note", "nothing measured"))?;
    fx.add_run(&runner_style("m_algo_baseline", 10.0, 0.2))?;
    let runs = RunLoader::default().load(fx.root())?;
    let rows = export_summary(&runs, &AnalyzerConfig::default().summary);
    assert_eq!(rows.len(), runs.len());
    assert_eq!(rows[0].configuration, "bare_run_x");
    assert_eq!(rows[0].values(), [0.0; 6]);
    Ok(())
}

#[test]
fn ablation_normalization_contract() {
    assert_eq!(normalize(&[10.0, 15.0]), (vec![1.0, 1.5], true));
    assert_eq!(normalize(&[0.0, 15.0]), (vec![0.0, 15.0], false));
}

#[test]
fn collisions_keep_the_later_artifact() -> TestResult<()> {
    let fx = ResultsFixture::new()?;
    fx.add_run(&runner_style("m/algo/baseline", 1.0, 0.1))?;
    fx.add_run(&runner_style("m_algo_baseline", 2.0, 0.1))?;
    let loader = RunLoader::default();
    let first = loader.load(fx.root())?;
    let second = loader.load(fx.root())?;
    assert_eq!(first.len(), 1);
    assert_eq!(first.get("m_algo_baseline").and_then(|r| r.number("Throughput")), Some(2.0));
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn derivations_are_repeatable() -> TestResult<()> {
    let fx = ResultsFixture::new()?;
    full_progression(&fx, "llama2-7b")?;
    full_progression(&fx, "opt-1b")?;
    let runs = RunLoader::default().load(fx.root())?;
    let cfg = AnalyzerConfig::default();
    assert_eq!(Report::build(&runs, &cfg), Report::build(&runs, &cfg));
    Ok(())
}

#[test]
fn runner_key_names_feed_every_comparison() -> TestResult<()> {
    let fx = ResultsFixture::new()?;
    for (suffix, tp, ee) in [("baseline", 10.0, 0.25), ("ahasd_full", 25.0, 0.5)] {
        fx.add_run(
            &RunSpec::new(format!("llama_specdec_{suffix}"))
                .metric("Throughput Tokens Per Sec", tp)
                .metric("Energy Efficiency Tokens Per Mj", ee),
        )?;
    }
    let runs = RunLoader::default().load(fx.root())?;
    let report = Report::build(&runs, &AnalyzerConfig::default());

    assert_eq!(report.summary[0].throughput, 25.0);
    assert_eq!(report.grouped.output.value("llama", "baseline"), Some(10.0));
    assert_eq!(report.grouped.output.value("llama", "ahasd_full"), Some(25.0));
    assert_eq!(report.paired.output.value("llama_specdec", "Baseline"), Some(0.25));
    assert_eq!(report.paired.output.value("llama_specdec", "AHASD Full"), Some(0.5));
    let ablation = report.ablation.as_ref().expect("baseline present");
    assert_eq!(ablation.output.series("Throughput").map(|s| s.raw[0]), Some(10.0));
    assert!(ablation.warnings.iter().all(|w| !matches!(w, Degradation::ZeroBaseline { .. })));
    Ok(())
}

#[test]
fn slash_delimiter_keeps_pairing_and_ablation_in_step() -> TestResult<()> {
    let fx = ResultsFixture::new()?;
    fx.add_run(&runner_style("llama/specdec/baseline", 10.0, 0.25))?;
    fx.add_run(&runner_style("llama/specdec/ahasd_full", 15.0, 0.5))?;
    let cfg = AnalyzerConfig { delimiter: "/".into(), ..AnalyzerConfig::default() };
    cfg.validate()?;
    let runs = RunLoader::new(cfg.delimiter.clone()).load(fx.root())?;
    let report = Report::build(&runs, &cfg);

    assert_eq!(report.paired.output.row_labels, vec!["llama/specdec"]);
    assert_eq!(report.paired.output.value("llama/specdec", "AHASD Full"), Some(0.5));
    assert!(report.paired.warnings.is_empty());
    let ablation = report.ablation.as_ref().expect("baseline present");
    assert_eq!(ablation.output.prefix, "llama/specdec");
    Ok(())
}
