use thiserror::Error;

use crate::model::{ScoreResult, VariableType};
use crate::score::StrategyKind;

pub mod stage1_preprocess;
pub mod stage2_exclude;

use stage1_preprocess::run_stage1;
use stage2_exclude::run_stage2;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("series to be compared do not have the same length: {prediction} vs {observed}")]
    ShapeMismatch { prediction: usize, observed: usize },

    #[error("strategy {strategy} has no scaling policy for variable type {variable}")]
    UnsupportedVariableType {
        strategy: &'static str,
        variable: VariableType,
    },

    #[error("cannot exclude {requested} outliers from {available} samples")]
    ExclusionCountOutOfRange { requested: usize, available: usize },
}

/// One comparison call. Every field is caller-owned input; the pipeline
/// keeps no state between calls.
#[derive(Debug, Clone)]
pub struct ComparisonRequest<'a> {
    pub prediction: &'a [f64],
    pub observed: &'a [f64],
    /// How many time units ahead the prediction was made for.
    pub horizon: f64,
    pub strategy: StrategyKind,
    pub variable: VariableType,
    /// Number of most-divergent sample pairs to drop before scoring.
    pub exclude: usize,
    /// Absolute difference deemed unacceptable; 0 disables the overage
    /// statistic.
    pub threshold: f64,
}

/// Runs the full comparison pipeline: shape check, preprocessing, outlier
/// exclusion, strategy scoring, horizon rescale, differences and threshold
/// overage. Any stage failure propagates unchanged; a corrupted comparison
/// must not silently produce a misleading score.
pub fn run_comparison(request: &ComparisonRequest<'_>) -> Result<ScoreResult, CompareError> {
    if request.prediction.len() != request.observed.len() {
        return Err(CompareError::ShapeMismatch {
            prediction: request.prediction.len(),
            observed: request.observed.len(),
        });
    }

    let stage1 = run_stage1(
        request.prediction,
        request.observed,
        !request.variable.admits_negative(),
    );

    let stage2 = run_stage2(&stage1.prediction, &stage1.observed, request.exclude)?;
    if !stage2.excluded.is_empty() {
        tracing::debug!(excluded = ?stage2.excluded, "excluded most-divergent samples");
    }

    let scored = request.strategy.strategy().score(
        &stage2.prediction,
        &stage2.observed,
        request.variable,
    )?;

    let measure = rescale_by_horizon(scored.measure, request.horizon);

    // Observed rain outcomes are booleans; differences are reported in
    // percent to match the prediction units.
    let observed: Vec<f64> = if request.variable == VariableType::ProbRain {
        stage1.observed.iter().map(|o| o * 100.0).collect()
    } else {
        stage1.observed
    };

    // Differences cover the cleaned series before exclusion, so callers can
    // see where the excluded outliers were.
    let differences: Vec<f64> = stage1
        .prediction
        .iter()
        .zip(&observed)
        .map(|(p, o)| p - o)
        .collect();

    let over_threshold = overage_fraction(&differences, request.threshold);

    Ok(ScoreResult {
        measure,
        value: scored.value,
        differences,
        over_threshold,
    })
}

/// Bends the bounded measure so that a fixed per-sample error is viewed in
/// a better light the further ahead the prediction was made. The fourth
/// root was chosen over a square root, which grew the effect too quickly.
pub fn rescale_by_horizon(measure: f64, horizon: f64) -> f64 {
    measure.powf(horizon.powf(0.25))
}

fn overage_fraction(differences: &[f64], threshold: f64) -> f64 {
    if threshold <= 0.0 || differences.is_empty() {
        return 0.0;
    }
    let over = differences.iter().filter(|d| d.abs() > threshold).count();
    over as f64 / differences.len() as f64
}
