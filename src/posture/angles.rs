//! Angle extraction.
//!
//! Image coordinates grow downward on the y axis, so "up" is `-y`. Every
//! angle is reported as an unsigned deviation in degrees: the direction of a
//! lean is not kept, only how far it is from level or upright.

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;
use super::landmarks::{BodyPart, LandmarkSet, Point};
use super::round_to;

/// Segments shorter than this cannot define a direction.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-6;

/// Landmarks consumed by [`extract_angles`].
pub const REQUIRED_LANDMARKS: [BodyPart; 6] = [
    BodyPart::LeftShoulder,
    BodyPart::RightShoulder,
    BodyPart::LeftEar,
    BodyPart::RightEar,
    BodyPart::LeftHip,
    BodyPart::RightHip,
];

/// The four scored metrics, in feedback priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Shoulder,
    Neck,
    Head,
    Spine,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Shoulder, Metric::Neck, Metric::Head, Metric::Spine];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSet {
    pub shoulder_angle: f64,
    pub neck_angle: f64,
    pub head_tilt: f64,
    pub spine_angle: f64,
}

impl AngleSet {
    /// Values are rounded to two decimals, and tiers are assigned from the
    /// rounded values. A raw 4.996 degrees is reported and scored as 5.00,
    /// so it lands on the Acceptable side of a `< 5` boundary. Re-scoring a
    /// stored record therefore reproduces its original tiers.
    pub fn new(shoulder_angle: f64, neck_angle: f64, head_tilt: f64, spine_angle: f64) -> Self {
        Self {
            shoulder_angle: round_to(shoulder_angle, 2),
            neck_angle: round_to(neck_angle, 2),
            head_tilt: round_to(head_tilt, 2),
            spine_angle: round_to(spine_angle, 2),
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Shoulder => self.shoulder_angle,
            Metric::Neck => self.neck_angle,
            Metric::Head => self.head_tilt,
            Metric::Spine => self.spine_angle,
        }
    }

    pub fn with(mut self, metric: Metric, degrees: f64) -> Self {
        let value = round_to(degrees, 2);
        match metric {
            Metric::Shoulder => self.shoulder_angle = value,
            Metric::Neck => self.neck_angle = value,
            Metric::Head => self.head_tilt = value,
            Metric::Spine => self.spine_angle = value,
        }
        self
    }
}

fn ensure_segment(from: Point, to: Point, segment: &str) -> Result<(), AnalysisError> {
    let length = from.distance(&to);
    if !length.is_finite() || length < MIN_SEGMENT_LENGTH {
        return Err(AnalysisError::unusable(format!(
            "{segment} segment is degenerate (length {length:e})"
        )));
    }
    Ok(())
}

/// Deviation of the line `a`-`b` from horizontal, in `[0, 90]`.
///
/// Independent of which endpoint is on the left.
pub fn slope_angle(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let angle = dy.atan2(dx).to_degrees().abs();
    if angle > 90.0 {
        180.0 - angle
    } else {
        angle
    }
}

/// Angle of the vector `from`→`to` measured from the upward vertical, in `[0, 180]`.
pub fn angle_from_vertical(from: Point, to: Point) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    dx.atan2(-dy).to_degrees().abs()
}

fn usable_point(
    landmarks: &LandmarkSet,
    part: BodyPart,
    min_visibility: f64,
) -> Result<Point, AnalysisError> {
    let landmark = landmarks
        .get(part)
        .ok_or_else(|| AnalysisError::unusable(format!("{part} is missing")))?;

    let point = landmark.point();
    if !point.is_finite() {
        return Err(AnalysisError::unusable(format!(
            "{part} has non-finite coordinates"
        )));
    }
    if landmark.visibility.is_nan() || landmark.visibility < min_visibility {
        return Err(AnalysisError::unusable(format!(
            "{part} visibility {:.2} is below {:.2}",
            landmark.visibility, min_visibility
        )));
    }
    Ok(point)
}

/// Derives the four posture angles from one frame's landmarks.
pub fn extract_angles(
    landmarks: &LandmarkSet,
    min_visibility: f64,
) -> Result<AngleSet, AnalysisError> {
    let left_shoulder = usable_point(landmarks, BodyPart::LeftShoulder, min_visibility)?;
    let right_shoulder = usable_point(landmarks, BodyPart::RightShoulder, min_visibility)?;
    let left_ear = usable_point(landmarks, BodyPart::LeftEar, min_visibility)?;
    let right_ear = usable_point(landmarks, BodyPart::RightEar, min_visibility)?;
    let left_hip = usable_point(landmarks, BodyPart::LeftHip, min_visibility)?;
    let right_hip = usable_point(landmarks, BodyPart::RightHip, min_visibility)?;

    let mid_shoulder = left_shoulder.midpoint(&right_shoulder);
    let mid_ear = left_ear.midpoint(&right_ear);
    let mid_hip = left_hip.midpoint(&right_hip);

    ensure_segment(left_shoulder, right_shoulder, "shoulder")?;
    ensure_segment(left_ear, right_ear, "ear")?;
    ensure_segment(mid_shoulder, mid_ear, "neck")?;
    ensure_segment(mid_hip, mid_shoulder, "torso")?;

    let angles = AngleSet::new(
        slope_angle(left_shoulder, right_shoulder),
        angle_from_vertical(mid_shoulder, mid_ear),
        slope_angle(left_ear, right_ear),
        angle_from_vertical(mid_hip, mid_shoulder),
    );

    if !Metric::ALL.iter().all(|m| angles.get(*m).is_finite()) {
        return Err(AnalysisError::unusable("angle computation produced a non-finite value"));
    }

    Ok(angles)
}
