use serde::{Deserialize, Serialize};

use super::angles::{AngleSet, Metric};

/// Deviation tier of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Ideal,
    Acceptable,
    Poor,
}

/// Tier boundaries in degrees. Ideal is `< ideal_below`, Acceptable is
/// `ideal_below ..= acceptable_up_to`, anything above is Poor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub ideal_below: f64,
    pub acceptable_up_to: f64,
}

/// Largest angle that can still be a real measurement of a seated person.
pub const MAX_PLAUSIBLE_DEGREES: f64 = 90.0;

impl Metric {
    pub fn thresholds(self) -> Thresholds {
        match self {
            Metric::Shoulder => Thresholds {
                ideal_below: 5.0,
                acceptable_up_to: 12.0,
            },
            Metric::Neck => Thresholds {
                ideal_below: 10.0,
                acceptable_up_to: 20.0,
            },
            Metric::Head => Thresholds {
                ideal_below: 5.0,
                acceptable_up_to: 10.0,
            },
            Metric::Spine => Thresholds {
                ideal_below: 8.0,
                acceptable_up_to: 15.0,
            },
        }
    }
}

/// Total over every `f64`: negative, NaN and implausibly large values are Poor.
pub fn classify(metric: Metric, degrees: f64) -> Tier {
    if !(0.0..=MAX_PLAUSIBLE_DEGREES).contains(&degrees) {
        return Tier::Poor;
    }

    let t = metric.thresholds();
    if degrees < t.ideal_below {
        Tier::Ideal
    } else if degrees <= t.acceptable_up_to {
        Tier::Acceptable
    } else {
        Tier::Poor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSet {
    pub shoulder: Tier,
    pub neck: Tier,
    pub head: Tier,
    pub spine: Tier,
}

impl TierSet {
    pub fn from_angles(angles: &AngleSet) -> Self {
        Self {
            shoulder: classify(Metric::Shoulder, angles.shoulder_angle),
            neck: classify(Metric::Neck, angles.neck_angle),
            head: classify(Metric::Head, angles.head_tilt),
            spine: classify(Metric::Spine, angles.spine_angle),
        }
    }

    pub fn get(&self, metric: Metric) -> Tier {
        match metric {
            Metric::Shoulder => self.shoulder,
            Metric::Neck => self.neck,
            Metric::Head => self.head,
            Metric::Spine => self.spine,
        }
    }

    /// Metrics with their tiers, in feedback priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Tier)> + '_ {
        Metric::ALL.iter().map(move |m| (*m, self.get(*m)))
    }
}
