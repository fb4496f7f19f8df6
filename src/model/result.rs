/// Outcome of a single comparison. Owned entirely by the caller; the
/// pipeline holds no state between calls.
#[derive(Debug, Clone)]
pub struct ScoreResult {
    /// Bounded similarity measure in [0,1]; 0 is a perfect match.
    pub measure: f64,
    /// Unbiased raw statistic in the variable's native units.
    pub value: f64,
    /// Point-wise prediction − observed, over the cleaned series before
    /// outlier exclusion, so excluded misses remain visible.
    pub differences: Vec<f64>,
    /// Fraction of |differences| above the acceptability threshold;
    /// 0 when the threshold is disabled.
    pub over_threshold: f64,
}
