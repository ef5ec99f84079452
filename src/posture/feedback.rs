use super::angles::Metric;
use super::classify::{Tier, TierSet};

/// Advice for one metric outside the ideal tier.
pub fn message(metric: Metric, tier: Tier) -> Option<&'static str> {
    let text = match (metric, tier) {
        (_, Tier::Ideal) => return None,
        (Metric::Shoulder, Tier::Acceptable) => {
            "Slight shoulder imbalance. Try to level both shoulders."
        }
        (Metric::Shoulder, Tier::Poor) => {
            "Uneven shoulders detected. Check your seating and straighten up."
        }
        (Metric::Neck, Tier::Acceptable) => {
            "Mild forward head posture. Draw your head back slightly."
        }
        (Metric::Neck, Tier::Poor) => {
            "Significant forward neck tilt. Align your ears directly over your shoulders."
        }
        (Metric::Head, Tier::Acceptable) => {
            "Slight head tilt. Keep your head level for a confident look."
        }
        (Metric::Head, Tier::Poor) => "Noticeable head tilt. Straighten your head position.",
        (Metric::Spine, Tier::Acceptable) => {
            "Mild slouching. Sit up straight and engage your core."
        }
        (Metric::Spine, Tier::Poor) => {
            "Significant slouching detected. Sit tall with your back against the chair."
        }
    };
    Some(text)
}

/// One entry per non-ideal metric, shoulder first and spine last.
pub fn generate(tiers: &TierSet) -> Vec<String> {
    tiers
        .iter()
        .filter_map(|(metric, tier)| message(metric, tier))
        .map(str::to_string)
        .collect()
}
