use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::VariableType;
use crate::score::StrategyKind;

/// One comparison case as it appears in the input file.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonCase {
    #[serde(default)]
    pub name: Option<String>,
    pub variable: VariableType,
    pub strategy: StrategyKind,
    #[serde(default = "default_horizon")]
    pub horizon: f64,
    #[serde(default)]
    pub exclude: usize,
    #[serde(default)]
    pub threshold: f64,
    pub prediction: Vec<f64>,
    pub observed: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct CaseFile {
    comparisons: Vec<ComparisonCase>,
}

fn default_horizon() -> f64 {
    1.0
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn load_cases(path: &Path) -> Result<Vec<ComparisonCase>, InputError> {
    let raw = fs::read_to_string(path)?;
    parse_cases(&raw)
}

pub fn parse_cases(raw: &str) -> Result<Vec<ComparisonCase>, InputError> {
    let file: CaseFile = serde_json::from_str(raw)?;
    if file.comparisons.is_empty() {
        return Err(InputError::InvalidInput(
            "input file holds no comparison cases".to_string(),
        ));
    }
    for (idx, case) in file.comparisons.iter().enumerate() {
        if case.horizon <= 0.0 {
            return Err(InputError::InvalidInput(format!(
                "case {}: horizon must be positive, got {}",
                case_label(case, idx),
                case.horizon
            )));
        }
    }
    Ok(file.comparisons)
}

pub fn case_label(case: &ComparisonCase, idx: usize) -> String {
    match &case.name {
        Some(name) => name.clone(),
        None => format!("#{idx}"),
    }
}
