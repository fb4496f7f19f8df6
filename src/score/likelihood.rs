use crate::model::VariableType;
use crate::pipeline::CompareError;
use crate::score::{Scored, Strategy};

/// Cross-entropy between predicted rain probabilities (in percent) and the
/// observed boolean outcomes. The only strategy defined for `prob_rain`;
/// every other variable type is refused.
pub struct ClassificationLikelihood;

const GAIN: f64 = 0.02;

// Probabilities are clamped away from 0 and 1 so a confidently wrong
// forecast yields a large finite loss instead of an infinite one.
const PROB_EPS: f64 = 1e-15;

impl Strategy for ClassificationLikelihood {
    fn name(&self) -> &'static str {
        "classification_likelihood"
    }

    fn score(
        &self,
        prediction: &[f64],
        observed: &[f64],
        variable: VariableType,
    ) -> Result<Scored, CompareError> {
        if variable != VariableType::ProbRain {
            return Err(CompareError::UnsupportedVariableType {
                strategy: self.name(),
                variable,
            });
        }

        let n = prediction.len() as f64;
        let mut loss = 0.0;
        for (p, o) in prediction.iter().zip(observed) {
            let p = (p / 100.0).clamp(PROB_EPS, 1.0 - PROB_EPS);
            let rained = *o != 0.0;
            loss -= if rained { p.ln() } else { (1.0 - p).ln() };
        }
        let cross_entropy = loss / n;

        Ok(Scored {
            measure: (GAIN * cross_entropy).tanh(),
            value: cross_entropy,
        })
    }
}
