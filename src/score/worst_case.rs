use std::f64::consts::PI;

use crate::model::VariableType;
use crate::pipeline::CompareError;
use crate::score::{Scored, Strategy, bound, mean};

/// Largest single miss, judged against the maximum that pure Gaussian noise
/// of the same sample count would be expected to produce. A model that is
/// roughly right everywhere but fails hard once (an unmodeled storm) is
/// exactly what this strategy punishes.
pub struct WorstCaseDeviation;

fn gain(variable: VariableType) -> Option<f64> {
    match variable {
        VariableType::Temperature => Some(0.5),
        VariableType::Humidity => Some(1.0),
        VariableType::Wind => Some(0.5),
        VariableType::Precipitation => Some(0.3),
        VariableType::ProbRain => None,
    }
}

/// Growth of the expected maximum of n i.i.d. Gaussians, with an
/// Euler–Mascheroni correction term. Longer series produce larger maxima
/// even under perfect noise; dividing by this removes that confound.
fn expected_max_scale(n: f64) -> f64 {
    let inner = n * n / (2.0 * PI);
    (inner / inner.log10()).log10().sqrt() * (1.0 + 0.577 / n.log10())
}

impl Strategy for WorstCaseDeviation {
    fn name(&self) -> &'static str {
        "worst_case_deviation"
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

        let worst = prediction
            .iter()
            .zip(observed)
            .map(|(p, o)| (p - o).abs())
            .fold(0.0, f64::max);

        // The sample-variance factor of the 4·σ̂² rescale cancels against
        // the σ̂² inside the expected maximum, leaving a purely size-based
        // correction. The cancelled form also keeps a perfect prediction
        // at exactly zero.
        let n = prediction.len() as f64;
        let rescaled = 4.0 * worst / expected_max_scale(n);

        let normalized = rescaled / mean(observed);
        Ok(Scored {
            measure: bound(gain, normalized),
            value: worst,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcg_next(state: &mut u64) -> f64 {
        *state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((*state >> 11) as f64) / ((1u64 << 53) as f64)
    }

    // Deterministic standard Gaussian samples via Box–Muller.
    fn gaussian_noise(n: usize, seed: u64) -> Vec<f64> {
        let mut state = seed;
        let mut out = Vec::with_capacity(n + 1);
        while out.len() < n {
            let u1 = lcg_next(&mut state).max(1e-12);
            let u2 = lcg_next(&mut state);
            let r = (-2.0 * u1.ln()).sqrt();
            out.push(r * (2.0 * PI * u2).cos());
            out.push(r * (2.0 * PI * u2).sin());
        }
        out.truncate(n);
        out
    }

    #[test]
    fn test_perfect_prediction_scores_zero() {
        let series = vec![5.0; 10];
        let out = WorstCaseDeviation
            .score(&series, &series, VariableType::Temperature)
            .unwrap();
        assert_eq!(out.measure, 0.0);
        assert_eq!(out.value, 0.0);
    }

    #[test]
    fn test_raw_value_is_largest_miss() {
        let observed = vec![10.0, 10.0, 10.0, 10.0, 10.0, 10.0];
        let prediction = vec![10.5, 9.5, 10.0, 13.0, 10.2, 9.8];
        let out = WorstCaseDeviation
            .score(&prediction, &observed, VariableType::Temperature)
            .unwrap();
        assert!((out.value - 3.0).abs() < 1e-12);
        assert!(out.measure > 0.0 && out.measure < 1.0);
    }

    #[test]
    fn test_expected_max_scale_grows_with_n() {
        assert!(expected_max_scale(500.0) > expected_max_scale(50.0));
        assert!(expected_max_scale(50.0) > 1.0);
    }

    #[test]
    fn test_score_invariant_to_sample_count_under_gaussian_noise() {
        // Fixed-variance noise around a flat signal: the null-hypothesis
        // correction should keep the measure roughly flat from n=50 to
        // n=500 even though the raw maximum grows.
        let score_for = |n: usize, seed: u64| {
            let observed = vec![10.0; n];
            let prediction: Vec<f64> = gaussian_noise(n, seed)
                .iter()
                .map(|z| 10.0 + z)
                .collect();
            WorstCaseDeviation
                .score(&prediction, &observed, VariableType::Temperature)
                .unwrap()
                .measure
        };
        let m_small = score_for(50, 0xDEADBEEF);
        let m_large = score_for(500, 0xDEADBEEF);
        assert!(m_small > 0.0 && m_small < 1.0);
        assert!(m_large > 0.0 && m_large < 1.0);
        assert!((m_small - m_large).abs() < 0.2);
    }

    #[test]
    fn test_rejects_prob_rain() {
        let err = WorstCaseDeviation
            .score(&[0.5], &[1.0], VariableType::ProbRain)
            .unwrap_err();
        assert!(matches!(
            err,
            CompareError::UnsupportedVariableType { .. }
        ));
    }
}
