use statrs::distribution::{ContinuousCDF, Normal};

/// Converts a forecast rain probability in [0,1] into a millimeter amount
/// by reading off a Gaussian fitted to the station's monthly rainfall.
/// The result is clamped to [0, mean + 3·variance], and probabilities
/// below 0.1 are treated as no rain at all.
///
/// Diagnostic helper for stations that only publish probabilities; it does
/// not feed back into scoring.
pub fn convert_rainfall(prob_rain: f64, mean: f64, variance: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).expect("unit normal is a valid distribution");
    let rainfall = mean + variance * normal.inverse_cdf(prob_rain);
    let rainfall = rainfall.min(mean + 3.0 * variance).max(0.0);
    if prob_rain < 0.1 { 0.0 } else { rainfall }
}
