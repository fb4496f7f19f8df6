mod convert;
mod input;
mod model;
mod pipeline;
mod report;
mod score;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::input::{case_label, load_cases};
use crate::pipeline::{ComparisonRequest, run_comparison};
use crate::report::{ReportMode, SummaryData, build_case_summary, write_reports};

#[derive(Debug, Parser)]
#[command(
    name = "forecast-skill",
    version,
    about = "Scores predicted weather time series against observations"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score every comparison case in an input file and write reports.
    Run {
        /// JSON file holding the comparison cases.
        #[arg(long)]
        input: PathBuf,
        /// Directory the reports are written into.
        #[arg(long)]
        out: PathBuf,
        /// Which reports to write.
        #[arg(long, value_enum, default_value_t = ReportMode::Both)]
        mode: ReportMode,
    },
    /// Convert a forecast rain probability into an estimated amount in mm.
    ConvertRainfall {
        /// Probability of rain in [0, 1].
        #[arg(long)]
        prob: f64,
        /// Mean monthly rainfall for the station, in mm.
        #[arg(long)]
        mean: f64,
        /// Variance of the monthly rainfall, in mm.
        #[arg(long)]
        variance: f64,
    },
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run { input, out, mode } => run_batch(&input, &out, mode),
        Command::ConvertRainfall {
            prob,
            mean,
            variance,
        } => {
            if !(0.0..=1.0).contains(&prob) {
                return Err(format!("probability must be in [0, 1], got {prob}"));
            }
            println!("{:.2}", convert::convert_rainfall(prob, mean, variance));
            Ok(())
        }
    }
}

fn run_batch(input: &Path, out: &Path, mode: ReportMode) -> Result<(), String> {
    let cases = load_cases(input).map_err(|e| e.to_string())?;
    tracing::info!(
        n_cases = cases.len(),
        input = %input.display(),
        "loaded comparison cases"
    );

    let mut rows = Vec::with_capacity(cases.len());
    for (idx, case) in cases.iter().enumerate() {
        let label = case_label(case, idx);
        let request = ComparisonRequest {
            prediction: &case.prediction,
            observed: &case.observed,
            horizon: case.horizon,
            strategy: case.strategy,
            variable: case.variable,
            exclude: case.exclude,
            threshold: case.threshold,
        };
        let result = run_comparison(&request).map_err(|e| format!("case {label}: {e}"))?;
        tracing::info!(
            case = %label,
            strategy = %case.strategy,
            measure = result.measure,
            value = result.value,
            "scored comparison"
        );
        rows.push(build_case_summary(case, idx, &result));
    }

    let summary = SummaryData {
        tool_name: "forecast-skill".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        n_cases: rows.len(),
        cases: rows,
    };
    write_reports(&summary, out, mode).map_err(|e| e.to_string())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
