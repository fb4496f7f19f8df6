use crate::pipeline::CompareError;

/// Pair with the `exclude` most-divergent samples removed, plus the indices
/// removed. Indices refer to the cleaned (stage-1) series and are reported
/// most-divergent first.
#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub prediction: Vec<f64>,
    pub observed: Vec<f64>,
    pub excluded: Vec<usize>,
}

/// Removes the `exclude` sample pairs with the largest absolute difference,
/// so that scoring is not dominated by a few catastrophic misses (an
/// unmodeled storm, a sensor glitch). Ties are broken deterministically:
/// the lower index wins.
pub fn run_stage2(
    prediction: &[f64],
    observed: &[f64],
    exclude: usize,
) -> Result<Stage2Output, CompareError> {
    if exclude == 0 {
        return Ok(Stage2Output {
            prediction: prediction.to_vec(),
            observed: observed.to_vec(),
            excluded: Vec::new(),
        });
    }

    if exclude >= prediction.len() {
        return Err(CompareError::ExclusionCountOutOfRange {
            requested: exclude,
            available: prediction.len(),
        });
    }

    let mut order: Vec<usize> = (0..prediction.len()).collect();
    order.sort_by(|&a, &b| {
        let da = (prediction[a] - observed[a]).abs();
        let db = (prediction[b] - observed[b]).abs();
        db.partial_cmp(&da)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    let excluded: Vec<usize> = order[..exclude].to_vec();

    let mut keep = vec![true; prediction.len()];
    for &idx in &excluded {
        keep[idx] = false;
    }

    let mut kept_prediction = Vec::with_capacity(prediction.len() - exclude);
    let mut kept_observed = Vec::with_capacity(observed.len() - exclude);
    for (idx, retain) in keep.iter().enumerate() {
        if *retain {
            kept_prediction.push(prediction[idx]);
            kept_observed.push(observed[idx]);
        }
    }

    Ok(Stage2Output {
        prediction: kept_prediction,
        observed: kept_observed,
        excluded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_exclusions_is_identity() {
        let prediction = vec![1.0, 2.0, 3.0];
        let observed = vec![3.0, 2.0, 1.0];
        let out = run_stage2(&prediction, &observed, 0).unwrap();
        assert_eq!(out.prediction, prediction);
        assert_eq!(out.observed, observed);
        assert!(out.excluded.is_empty());
    }

    #[test]
    fn test_removes_largest_divergence() {
        let prediction = vec![10.0, 10.0, 10.0, 10.0];
        let observed = vec![10.5, 18.0, 9.0, 10.1];
        let out = run_stage2(&prediction, &observed, 1).unwrap();
        assert_eq!(out.excluded, vec![1]);
        assert_eq!(out.prediction, vec![10.0, 10.0, 10.0]);
        assert_eq!(out.observed, vec![10.5, 9.0, 10.1]);
    }

    #[test]
    fn test_excluded_ordered_most_divergent_first() {
        let prediction = vec![0.0, 0.0, 0.0, 0.0];
        let observed = vec![1.0, 5.0, 3.0, 0.5];
        let out = run_stage2(&prediction, &observed, 2).unwrap();
        assert_eq!(out.excluded, vec![1, 2]);
    }

    #[test]
    fn test_tie_break_prefers_lower_index() {
        let prediction = vec![0.0, 0.0, 0.0];
        let observed = vec![2.0, 2.0, 1.0];
        let out = run_stage2(&prediction, &observed, 1).unwrap();
        assert_eq!(out.excluded, vec![0]);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let prediction = vec![0.0, 1.0, 0.0, 1.0, 0.0];
        let observed = vec![2.0, 3.0, 2.0, 3.0, 1.0];
        let a = run_stage2(&prediction, &observed, 3).unwrap();
        let b = run_stage2(&prediction, &observed, 3).unwrap();
        assert_eq!(a.excluded, b.excluded);
        assert_eq!(a.prediction, b.prediction);
    }

    #[test]
    fn test_full_exclusion_is_out_of_range() {
        let prediction = vec![1.0, 2.0, 3.0];
        let observed = vec![1.0, 2.0, 3.0];
        let err = run_stage2(&prediction, &observed, 3).unwrap_err();
        assert!(matches!(
            err,
            CompareError::ExclusionCountOutOfRange {
                requested: 3,
                available: 3
            }
        ));
    }

    #[test]
    fn test_exclusion_beyond_length_is_out_of_range() {
        let err = run_stage2(&[1.0], &[2.0], 5).unwrap_err();
        assert!(matches!(
            err,
            CompareError::ExclusionCountOutOfRange { .. }
        ));
    }
}
