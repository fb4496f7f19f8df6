use std::fmt;

use serde::{Deserialize, Serialize};

/// Weather variable carried by a comparison. Selects admissibility rules
/// during preprocessing and the scaling constants inside each strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    Temperature,
    Humidity,
    Wind,
    Precipitation,
    ProbRain,
}

impl VariableType {
    /// Only temperature can legitimately go below zero; for every other
    /// variable a negative sample is a data defect and is cleaned away.
    pub fn admits_negative(self) -> bool {
        matches!(self, VariableType::Temperature)
    }

    pub fn tag(self) -> &'static str {
        match self {
            VariableType::Temperature => "temperature",
            VariableType::Humidity => "humidity",
            VariableType::Wind => "wind",
            VariableType::Precipitation => "precipitation",
            VariableType::ProbRain => "prob_rain",
        }
    }

    /// Display unit for reports. Rain probability is reported in percent,
    /// matching the ×100 rescale applied to observed outcomes.
    pub fn unit(self) -> &'static str {
        match self {
            VariableType::Temperature => "°C",
            VariableType::Humidity => "%",
            VariableType::Wind => "km/h",
            VariableType::Precipitation => "mm",
            VariableType::ProbRain => "%",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
