use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::input::{ComparisonCase, case_label};
use crate::model::ScoreResult;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    Text,
    Json,
    Both,
}

/// One scored case, flattened for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct CaseSummary {
    pub name: String,
    pub variable: String,
    pub unit: String,
    pub strategy: String,
    pub horizon: f64,
    pub n_samples: usize,
    pub n_clean: usize,
    pub n_scored: usize,
    pub measure: f64,
    pub value: f64,
    pub over_threshold: f64,
    pub abs_diff_median: f64,
    pub abs_diff_p90: f64,
    pub abs_diff_max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool_name: String,
    pub tool_version: String,
    pub n_cases: usize,
    pub cases: Vec<CaseSummary>,
}

pub fn build_case_summary(
    case: &ComparisonCase,
    idx: usize,
    result: &ScoreResult,
) -> CaseSummary {
    let abs_diffs: Vec<f64> = result.differences.iter().map(|d| d.abs()).collect();
    let n_clean = result.differences.len();
    CaseSummary {
        name: case_label(case, idx),
        variable: case.variable.to_string(),
        unit: case.variable.unit().to_string(),
        strategy: case.strategy.to_string(),
        horizon: case.horizon,
        n_samples: case.prediction.len(),
        n_clean,
        n_scored: n_clean - case.exclude,
        measure: result.measure,
        value: result.value,
        over_threshold: result.over_threshold,
        abs_diff_median: median(&abs_diffs),
        abs_diff_p90: p90(&abs_diffs),
        abs_diff_max: abs_diffs.iter().copied().fold(0.0, f64::max),
    }
}

pub fn write_reports(
    summary: &SummaryData,
    out_dir: &Path,
    mode: ReportMode,
) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    if matches!(mode, ReportMode::Json | ReportMode::Both) {
        let rendered = json::render_summary_json(summary).map_err(std::io::Error::other)?;
        fs::write(out_dir.join("summary.json"), rendered)?;
    }
    if matches!(mode, ReportMode::Text | ReportMode::Both) {
        fs::write(out_dir.join("report.txt"), text::render_report_text(summary))?;
    }

    Ok(())
}

pub fn format_f64_6(v: f64) -> String {
    format!("{v:.6}")
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = ((sorted.len() - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VariableType;
    use crate::score::StrategyKind;

    fn sample_case() -> ComparisonCase {
        ComparisonCase {
            name: Some("athens".to_string()),
            variable: VariableType::Temperature,
            strategy: StrategyKind::MeanAbsoluteDeviation,
            horizon: 1.0,
            exclude: 1,
            threshold: 0.5,
            prediction: vec![10.0, 12.0, 14.0, 16.0],
            observed: vec![10.0, 11.0, 14.0, 15.0],
        }
    }

    fn sample_result() -> ScoreResult {
        ScoreResult {
            measure: 0.1,
            value: 0.5,
            differences: vec![0.0, 1.0, 0.0, 1.0],
            over_threshold: 0.5,
        }
    }

    #[test]
    fn test_quantiles() {
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(median(&v), 3.0);
        assert_eq!(p90(&v), 5.0);
        assert_eq!(quantile_indexed(&[], 0.5), 0.0);
    }

    #[test]
    fn test_case_summary_counts() {
        let summary = build_case_summary(&sample_case(), 0, &sample_result());
        assert_eq!(summary.name, "athens");
        assert_eq!(summary.n_samples, 4);
        assert_eq!(summary.n_clean, 4);
        assert_eq!(summary.n_scored, 3);
        assert_eq!(summary.unit, "°C");
        assert_eq!(summary.strategy, "mean_absolute_deviation");
    }

    #[test]
    fn test_case_summary_diff_stats() {
        let summary = build_case_summary(&sample_case(), 0, &sample_result());
        assert_eq!(summary.abs_diff_median, 1.0);
        assert_eq!(summary.abs_diff_p90, 1.0);
        assert_eq!(summary.abs_diff_max, 1.0);
    }

    #[test]
    fn test_unnamed_case_gets_index_label() {
        let mut case = sample_case();
        case.name = None;
        let summary = build_case_summary(&case, 3, &sample_result());
        assert_eq!(summary.name, "#3");
    }
}
