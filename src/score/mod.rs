use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::VariableType;
use crate::pipeline::CompareError;

pub mod global_deviation;
pub mod likelihood;
pub mod mean_absolute;
pub mod worst_case;

pub use global_deviation::GlobalDeviation;
pub use likelihood::ClassificationLikelihood;
pub use mean_absolute::MeanAbsoluteDeviation;
pub use worst_case::WorstCaseDeviation;

/// Bounded measure plus the unbiased statistic it was derived from.
#[derive(Debug, Clone, Copy)]
pub struct Scored {
    /// Similarity measure in [0,1]; 0 is a perfect match.
    pub measure: f64,
    /// Raw statistic in the variable's native units.
    pub value: f64,
}

/// A similarity-scoring strategy over a cleaned, exclusion-applied pair of
/// series. Each implementation holds its own per-variable gain table and
/// refuses variable types outside it.
pub trait Strategy {
    fn name(&self) -> &'static str;

    fn score(
        &self,
        prediction: &[f64],
        observed: &[f64],
        variable: VariableType,
    ) -> Result<Scored, CompareError>;
}

/// Strategy selector for input files and requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    GlobalDeviation,
    MeanAbsoluteDeviation,
    WorstCaseDeviation,
    ClassificationLikelihood,
}

impl StrategyKind {
    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            StrategyKind::GlobalDeviation => &GlobalDeviation,
            StrategyKind::MeanAbsoluteDeviation => &MeanAbsoluteDeviation,
            StrategyKind::WorstCaseDeviation => &WorstCaseDeviation,
            StrategyKind::ClassificationLikelihood => &ClassificationLikelihood,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy().name())
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Saturates a mean-normalized statistic into [0,1]. The gain encodes how
/// harshly the variable type punishes error of that kind.
pub(crate) fn bound(gain: f64, normalized: f64) -> f64 {
    (gain * normalized).tanh()
}
