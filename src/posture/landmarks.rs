//! Landmark contract between the pose detector and the scoring engine.
//!
//! Detectors report named anatomical points with a 2D position and a
//! visibility score. Coordinates may be normalized to `[0, 1]` or expressed
//! in pixels, as long as every landmark of one frame uses the same space.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named keypoints of the 17-point COCO layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPart {
    pub const ALL: [BodyPart; 17] = [
        BodyPart::Nose,
        BodyPart::LeftEye,
        BodyPart::RightEye,
        BodyPart::LeftEar,
        BodyPart::RightEar,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftElbow,
        BodyPart::RightElbow,
        BodyPart::LeftWrist,
        BodyPart::RightWrist,
        BodyPart::LeftHip,
        BodyPart::RightHip,
        BodyPart::LeftKnee,
        BodyPart::RightKnee,
        BodyPart::LeftAnkle,
        BodyPart::RightAnkle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BodyPart::Nose => "nose",
            BodyPart::LeftEye => "left_eye",
            BodyPart::RightEye => "right_eye",
            BodyPart::LeftEar => "left_ear",
            BodyPart::RightEar => "right_ear",
            BodyPart::LeftShoulder => "left_shoulder",
            BodyPart::RightShoulder => "right_shoulder",
            BodyPart::LeftElbow => "left_elbow",
            BodyPart::RightElbow => "right_elbow",
            BodyPart::LeftWrist => "left_wrist",
            BodyPart::RightWrist => "right_wrist",
            BodyPart::LeftHip => "left_hip",
            BodyPart::RightHip => "right_hip",
            BodyPart::LeftKnee => "left_knee",
            BodyPart::RightKnee => "right_knee",
            BodyPart::LeftAnkle => "left_ankle",
            BodyPart::RightAnkle => "right_ankle",
        }
    }

    /// Maps a MediaPipe Pose (33-point BlazePose) landmark index onto the
    /// COCO subset. Face-mesh, hand and foot points have no counterpart.
    pub fn from_mediapipe_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(BodyPart::Nose),
            2 => Some(BodyPart::LeftEye),
            5 => Some(BodyPart::RightEye),
            7 => Some(BodyPart::LeftEar),
            8 => Some(BodyPart::RightEar),
            11 => Some(BodyPart::LeftShoulder),
            12 => Some(BodyPart::RightShoulder),
            13 => Some(BodyPart::LeftElbow),
            14 => Some(BodyPart::RightElbow),
            15 => Some(BodyPart::LeftWrist),
            16 => Some(BodyPart::RightWrist),
            23 => Some(BodyPart::LeftHip),
            24 => Some(BodyPart::RightHip),
            25 => Some(BodyPart::LeftKnee),
            26 => Some(BodyPart::RightKnee),
            27 => Some(BodyPart::LeftAnkle),
            28 => Some(BodyPart::RightAnkle),
            _ => None,
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown body part: {0}")]
pub struct UnknownBodyPart(pub String);

impl FromStr for BodyPart {
    type Err = UnknownBodyPart;

    /// Accepts `left_shoulder`, `left-shoulder`, `LEFT_SHOULDER` and `Left Shoulder`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        BodyPart::ALL
            .iter()
            .copied()
            .find(|part| part.as_str() == normalized)
            .ok_or_else(|| UnknownBodyPart(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Likelihood in `[0, 1]` that the point was localized correctly.
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, visibility }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One landmark as it travels over the wire (request bodies, pose service replies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLandmark {
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Detectors without a visibility channel may omit it.
    #[serde(default = "full_visibility")]
    pub visibility: f64,
}

fn full_visibility() -> f64 {
    1.0
}

/// All landmarks reported for a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkSet {
    landmarks: BTreeMap<BodyPart, Landmark>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from wire landmarks. Names outside the COCO layout are
    /// skipped; a repeated name keeps its last occurrence.
    pub fn from_named<I>(named: I) -> Self
    where
        I: IntoIterator<Item = NamedLandmark>,
    {
        let mut set = Self::new();
        for item in named {
            match item.name.parse::<BodyPart>() {
                Ok(part) => {
                    set.insert(part, Landmark::new(item.x, item.y, item.visibility));
                }
                Err(e) => tracing::debug!(error = %e, "Ignoring landmark"),
            }
        }
        set
    }

    pub fn insert(&mut self, part: BodyPart, landmark: Landmark) -> Option<Landmark> {
        self.landmarks.insert(part, landmark)
    }

    pub fn get(&self, part: BodyPart) -> Option<&Landmark> {
        self.landmarks.get(&part)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyPart, &Landmark)> {
        self.landmarks.iter().map(|(part, lm)| (*part, lm))
    }

    /// Converts normalized coordinates into pixel space for a `width` × `height` frame.
    pub fn scaled(&self, width: f64, height: f64) -> LandmarkSet {
        self.landmarks
            .iter()
            .map(|(part, lm)| {
                (
                    *part,
                    Landmark::new(lm.x * width, lm.y * height, lm.visibility),
                )
            })
            .collect()
    }
}

impl FromIterator<(BodyPart, Landmark)> for LandmarkSet {
    fn from_iter<T: IntoIterator<Item = (BodyPart, Landmark)>>(iter: T) -> Self {
        Self {
            landmarks: iter.into_iter().collect(),
        }
    }
}

/// Output of a landmark provider for one image.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    NotDetected,
    Landmarks(LandmarkSet),
}

impl Detection {
    /// An absent or empty landmark list means the provider saw nobody.
    pub fn from_wire(landmarks: Option<Vec<NamedLandmark>>) -> Self {
        match landmarks {
            Some(list) if !list.is_empty() => Detection::Landmarks(LandmarkSet::from_named(list)),
            _ => Detection::NotDetected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, x: f64, y: f64) -> NamedLandmark {
        NamedLandmark {
            name: name.to_string(),
            x,
            y,
            visibility: 0.9,
        }
    }

    #[test]
    fn body_part_parses_common_spellings() {
        assert_eq!("left_shoulder".parse::<BodyPart>().unwrap(), BodyPart::LeftShoulder);
        assert_eq!("left-shoulder".parse::<BodyPart>().unwrap(), BodyPart::LeftShoulder);
        assert_eq!("RIGHT_EAR".parse::<BodyPart>().unwrap(), BodyPart::RightEar);
        assert_eq!(" Right Hip ".parse::<BodyPart>().unwrap(), BodyPart::RightHip);
        assert!("left_pinky".parse::<BodyPart>().is_err());
    }

    #[test]
    fn mediapipe_indices_map_to_named_parts() {
        assert_eq!(BodyPart::from_mediapipe_index(0), Some(BodyPart::Nose));
        assert_eq!(BodyPart::from_mediapipe_index(11), Some(BodyPart::LeftShoulder));
        assert_eq!(BodyPart::from_mediapipe_index(24), Some(BodyPart::RightHip));
        assert_eq!(BodyPart::from_mediapipe_index(17), None);
        assert_eq!(BodyPart::from_mediapipe_index(99), None);
    }

    #[test]
    fn from_named_skips_unknown_and_keeps_last_duplicate() {
        let set = LandmarkSet::from_named(vec![
            named("nose", 0.5, 0.2),
            named("left_pinky", 0.1, 0.1),
            named("nose", 0.6, 0.3),
        ]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(BodyPart::Nose).unwrap().x, 0.6);
    }

    #[test]
    fn missing_visibility_defaults_to_full() {
        let lm: NamedLandmark =
            serde_json::from_str(r#"{"name":"nose","x":0.5,"y":0.4}"#).unwrap();
        assert_eq!(lm.visibility, 1.0);
    }

    #[test]
    fn scaled_keeps_visibility() {
        let mut set = LandmarkSet::new();
        set.insert(BodyPart::Nose, Landmark::new(0.5, 0.25, 0.7));
        let scaled = set.scaled(640.0, 480.0);
        let nose = scaled.get(BodyPart::Nose).unwrap();
        assert_eq!((nose.x, nose.y, nose.visibility), (320.0, 120.0, 0.7));
    }

    #[test]
    fn empty_wire_list_is_not_detected() {
        assert_eq!(Detection::from_wire(None), Detection::NotDetected);
        assert_eq!(Detection::from_wire(Some(vec![])), Detection::NotDetected);
        assert!(matches!(
            Detection::from_wire(Some(vec![named("nose", 0.1, 0.1)])),
            Detection::Landmarks(_)
        ));
    }
}
