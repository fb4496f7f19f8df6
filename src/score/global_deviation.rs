use crate::model::VariableType;
use crate::pipeline::CompareError;
use crate::score::{Scored, Strategy, bound, mean};

/// Root-mean-square deviation as a global descriptive measure. The optimal
/// choice when the difference signal is additive Gaussian noise.
pub struct GlobalDeviation;

fn gain(variable: VariableType) -> Option<f64> {
    match variable {
        VariableType::Temperature => Some(2.0),
        VariableType::Humidity => Some(3.0),
        VariableType::Wind => Some(2.0),
        VariableType::Precipitation => Some(0.6),
        VariableType::ProbRain => None,
    }
}

impl Strategy for GlobalDeviation {
    fn name(&self) -> &'static str {
        "global_deviation"
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
        let sum_sq: f64 = prediction
            .iter()
            .zip(observed)
            .map(|(p, o)| (p - o) * (p - o))
            .sum();
        let rms = (sum_sq / n).sqrt();

        let normalized = rms / mean(observed);
        Ok(Scored {
            measure: bound(gain, normalized),
            value: rms,
        })
    }
}
