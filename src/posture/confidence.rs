use super::landmarks::{BodyPart, LandmarkSet};
use super::round_to;

/// Mean visibility scaled to a 0-100 percentage with one decimal.
/// Individual visibilities are clamped into `[0, 1]`; an empty slice is 0.
pub fn mean_visibility_percent(visibilities: &[f64]) -> f64 {
    if visibilities.is_empty() {
        return 0.0;
    }
    let sum: f64 = visibilities
        .iter()
        .map(|v| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 })
        .sum();
    round_to(sum / visibilities.len() as f64 * 100.0, 1)
}

/// Confidence over the landmarks that were actually used to compute the
/// angles. Parts absent from the set count as invisible.
pub fn estimate(landmarks: &LandmarkSet, consumed: &[BodyPart]) -> f64 {
    let visibilities: Vec<f64> = consumed
        .iter()
        .map(|part| landmarks.get(*part).map_or(0.0, |lm| lm.visibility))
        .collect();
    mean_visibility_percent(&visibilities)
}
