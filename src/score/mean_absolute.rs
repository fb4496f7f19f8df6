use crate::model::VariableType;
use crate::pipeline::CompareError;
use crate::score::{Scored, Strategy, bound, mean};

/// Mean absolute deviation. Punishes isolated large misses less severely
/// than the squared form, so it rewards consistent near-misses.
pub struct MeanAbsoluteDeviation;

fn gain(variable: VariableType) -> Option<f64> {
    match variable {
        VariableType::Temperature => Some(2.5),
        VariableType::Humidity => Some(4.0),
        VariableType::Wind => Some(2.5),
        VariableType::Precipitation => Some(0.8),
        VariableType::ProbRain => None,
    }
}

impl Strategy for MeanAbsoluteDeviation {
    fn name(&self) -> &'static str {
        "mean_absolute_deviation"
    }

    fn score(
        &self,
        prediction: &[f64],
        observed: &[f64],
        variable: VariableType,
    ) -> Result<Scored, CompareError> {
        let gain = gain(variable).ok_or(CompareError::UnsupportedVariableType {
            strategy: self.name(),
            variable,
        })?;

        let n = prediction.len() as f64;
        let sum_abs: f64 = prediction
            .iter()
            .zip(observed)
            .map(|(p, o)| (p - o).abs())
            .sum();
        let mad = sum_abs / n;

        let normalized = mad / mean(observed);
        Ok(Scored {
            measure: bound(gain, normalized),
            value: mad,
        })
    }
}
