#![forbid(unsafe_code)]

//! `ahasd`: aggregate simulation results and derive comparison outputs.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ahasd_compare::{summary, Report};
use ahasd_core::{AnalyzerConfig, RunCollection, RunLoader};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

const EXIT_FATAL: u8 = 1;
const EXIT_EMPTY: u8 = 2;
const EXIT_OUTPUT_FAILED: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "ahasd", version, about = "AHASD simulation results analyzer")]
struct Cli {
	/// Analyzer config (TOML). Falls back to $AHASD_CONFIG.
	#[arg(long, global = true)]
	config: Option<PathBuf>,
	/// Log level override (trace, debug, info, warn, error)
	#[arg(long, global = true)]
	log_level: Option<String>,
	/// Identifier delimiter override
	#[arg(long, global = true)]
	delimiter: Option<String>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Load every run under DIR and write all comparison outputs
	Analyze {
		dir: PathBuf,
		/// Output directory (default: DIR/<plots_dir>)
		#[arg(long)]
		output: Option<PathBuf>,
		/// Exit non-zero if any output could not be written
		#[arg(long)]
		strict: bool,
	},
	/// Print the summary table as CSV to stdout
	Summary { dir: PathBuf },
	/// Print comparison tables to stdout
	Show { dir: PathBuf },
	/// Config helpers
	Config {
		#[command(subcommand)]
		action: ConfigCmd,
	},
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
	/// Show the effective config (defaults, file, env, flags)
	Show,
	/// Write an ahasd.toml template with the default settings
	WriteTemplate {
		/// Destination path (default: ./ahasd.toml)
		#[arg(long)]
		path: Option<PathBuf>,
		/// Overwrite if file exists
		#[arg(long)]
		force: bool,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	let cfg = match resolve_config(&cli) {
		Ok(c) => c,
		Err(e) => {
			eprintln!("error: {e:#}");
			return ExitCode::from(EXIT_FATAL);
		}
	};
	init_tracing(&cfg.log_level);

	match run(cli.command, &cfg) {
		Ok(code) => ExitCode::from(code),
		Err(e) => match e.downcast_ref::<ahasd_core::Error>() {
			Some(ahasd_core::Error::EmptyResults(_)) => {
				eprintln!("No results found!");
				ExitCode::from(EXIT_EMPTY)
			}
			_ => {
				eprintln!("error: {e:#}");
				ExitCode::from(EXIT_FATAL)
			}
		},
	}
}

fn run(command: Commands, cfg: &AnalyzerConfig) -> anyhow::Result<u8> {
	match command {
		Commands::Analyze { dir, output, strict } => {
			info!("analyzing results from: {}", dir.display());
			let runs = load_runs(&dir, cfg)?;
			let report = Report::build(&runs, cfg);
			let out_dir = output.unwrap_or_else(|| dir.join(&cfg.plots_dir));
			std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
			let outcome = render::write_outputs(&report, &out_dir, &render::default_writers());
			info!(written = outcome.written.len(), failed = outcome.failed.len(), "analysis complete; results saved to {}", out_dir.display());
			println!("{}", out_dir.display());
			if strict && !outcome.failed.is_empty() {
				for (name, err) in &outcome.failed { eprintln!("failed: {name}: {err}"); }
				return Ok(EXIT_OUTPUT_FAILED);
			}
			Ok(0)
		}
		Commands::Summary { dir } => {
			let runs = load_runs(&dir, cfg)?;
			let rows = ahasd_compare::export_summary(&runs, &cfg.summary);
			let stdout = std::io::stdout();
			summary::write_csv(&rows, stdout.lock())?;
			Ok(0)
		}
		Commands::Show { dir } => {
			let runs = load_runs(&dir, cfg)?;
			let report = Report::build(&runs, cfg);
			let mut out = std::io::stdout().lock();
			writeln!(out, "{}\n{}\n", report.grouped.output.title, render::comparison_table(&report.grouped.output))?;
			writeln!(out, "{}\n{}\n", report.paired.output.title, render::comparison_table(&report.paired.output))?;
			match &report.ablation {
				Ok(d) => writeln!(out, "{}\n{}\n", d.output.to_table().title, render::ablation_table(&d.output))?,
				Err(e) => writeln!(out, "Ablation Study: {e}\n")?,
			}
			writeln!(out, "Summary\n{}", render::summary_table(&report.summary))?;
			Ok(0)
		}
		Commands::Config { action } => match action {
			ConfigCmd::Show => {
				print!("{}", cfg.to_toml_string()?);
				Ok(0)
			}
			ConfigCmd::WriteTemplate { path, force } => {
				let path = path.unwrap_or_else(|| PathBuf::from("ahasd.toml"));
				if path.exists() && !force {
					anyhow::bail!("refusing to overwrite existing file: {} (use --force)", path.display());
				}
				AnalyzerConfig::default().write_to_file(&path)?;
				eprintln!("wrote {}", path.display());
				Ok(0)
			}
		},
	}
}

fn load_runs(dir: &Path, cfg: &AnalyzerConfig) -> anyhow::Result<RunCollection> {
	let runs = RunLoader::new(cfg.delimiter.clone()).load(dir)?.require_results(dir)?;
	info!("found {} configurations", runs.len());
	Ok(runs)
}

/// Defaults, then the config file, then env, then flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<AnalyzerConfig> {
	let file = cli.config.clone().or_else(|| std::env::var_os("AHASD_CONFIG").map(PathBuf::from));
	let mut cfg = match file {
		Some(p) => AnalyzerConfig::load_from_file(&p).with_context(|| format!("loading config {}", p.display()))?,
		None => AnalyzerConfig::default(),
	};
	cfg.apply_env();
	if let Some(level) = &cli.log_level { cfg.log_level = level.clone(); }
	if let Some(d) = &cli.delimiter { cfg.delimiter = d.clone(); }
	cfg.validate()?;
	Ok(cfg)
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).try_init();
}
