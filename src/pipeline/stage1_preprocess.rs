/// Cleaned pair after inadmissible samples are dropped. Both series are
/// filtered with the same index set, so positional alignment of the
/// retained samples is preserved.
#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub prediction: Vec<f64>,
    pub observed: Vec<f64>,
}

/// Drops every index where either series holds a NaN and, when
/// `discard_negative` is set, every index where either series is negative.
/// Removal is silent cleaning: forecast datasets routinely contain missing
/// values, so this is expected input shape, not a fault.
pub fn run_stage1(prediction: &[f64], observed: &[f64], discard_negative: bool) -> Stage1Output {
    let mut kept_prediction = Vec::with_capacity(prediction.len());
    let mut kept_observed = Vec::with_capacity(observed.len());

    for (p, o) in prediction.iter().zip(observed) {
        if p.is_nan() || o.is_nan() {
            continue;
        }
        if discard_negative && (*p < 0.0 || *o < 0.0) {
            continue;
        }
        kept_prediction.push(*p);
        kept_observed.push(*o);
    }

    let removed = prediction.len() - kept_prediction.len();
    if removed > 0 {
        tracing::debug!(removed, "dropped inadmissible sample pairs");
    }

    Stage1Output {
        prediction: kept_prediction,
        observed: kept_observed,
    }
}
