//! Weighted-penalty aggregation.
//!
//! Every metric subtracts a fixed penalty from 100 depending on its tier.
//! Neck and spine deviations cost at least as much as shoulder and head
//! deviations in both non-ideal tiers. Because penalties only grow with the
//! tier and tiers only grow with the angle, the score never rises when an
//! angle gets worse.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::angles::{AngleSet, Metric};
use super::classify::{Tier, TierSet};

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Penalty {
    pub acceptable: u8,
    pub poor: u8,
}

impl Metric {
    pub fn penalty(self) -> Penalty {
        match self {
            Metric::Shoulder => Penalty {
                acceptable: 10,
                poor: 25,
            },
            Metric::Neck => Penalty {
                acceptable: 15,
                poor: 30,
            },
            Metric::Head => Penalty {
                acceptable: 5,
                poor: 15,
            },
            Metric::Spine => Penalty {
                acceptable: 10,
                poor: 25,
            },
        }
    }
}

pub fn penalty_for(metric: Metric, tier: Tier) -> u32 {
    let penalty = metric.penalty();
    match tier {
        Tier::Ideal => 0,
        Tier::Acceptable => u32::from(penalty.acceptable),
        Tier::Poor => u32::from(penalty.poor),
    }
}

pub fn aggregate(tiers: &TierSet) -> u8 {
    let total: u32 = tiers
        .iter()
        .map(|(metric, tier)| penalty_for(metric, tier))
        .sum();
    let score = u32::from(MAX_SCORE).saturating_sub(total);
    score.min(u32::from(MAX_SCORE)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostureStatus {
    Excellent,
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Poor,
}

impl PostureStatus {
    /// Breakpoints: 85+ Excellent, 65-84 Good, 45-64 Needs Improvement, below 45 Poor.
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => PostureStatus::Excellent,
            65..=84 => PostureStatus::Good,
            45..=64 => PostureStatus::NeedsImprovement,
            _ => PostureStatus::Poor,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostureStatus::Excellent => "Excellent",
            PostureStatus::Good => "Good",
            PostureStatus::NeedsImprovement => "Needs Improvement",
            PostureStatus::Poor => "Poor",
        }
    }
}

impl fmt::Display for PostureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine output for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(flatten)]
    pub angles: AngleSet,
    pub posture_score: u8,
    pub posture_status: PostureStatus,
    /// Mean visibility of the consumed landmarks, 0-100 with one decimal.
    pub confidence: f64,
    pub feedback: Vec<String>,
}
