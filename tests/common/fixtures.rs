use std::io::Cursor;

use base64::Engine as _;
use serde_json::{json, Value};

use posture_backend::posture::{BodyPart, Landmark, LandmarkSet};

pub const USER: &str = "candidate-1";

pub fn user_header(user_id: &str) -> [(&'static str, String); 1] {
    [("x-user-id", user_id.to_string())]
}

/// Upright sitter in normalized coordinates.
pub fn upright_landmarks() -> Value {
    json!([
        { "name": "nose", "x": 0.5, "y": 0.2, "visibility": 0.99 },
        { "name": "left_ear", "x": 0.55, "y": 0.25, "visibility": 0.9 },
        { "name": "right_ear", "x": 0.45, "y": 0.25, "visibility": 0.9 },
        { "name": "left_shoulder", "x": 0.62, "y": 0.45, "visibility": 0.95 },
        { "name": "right_shoulder", "x": 0.38, "y": 0.45, "visibility": 0.95 },
        { "name": "left_hip", "x": 0.6, "y": 0.85, "visibility": 0.85 },
        { "name": "right_hip", "x": 0.4, "y": 0.85, "visibility": 0.85 }
    ])
}

/// Ears far ahead of the shoulders and one shoulder dropped.
pub fn slouched_landmarks() -> Value {
    json!([
        { "name": "left_ear", "x": 0.70, "y": 0.30, "visibility": 0.9 },
        { "name": "right_ear", "x": 0.60, "y": 0.30, "visibility": 0.9 },
        { "name": "left_shoulder", "x": 0.62, "y": 0.50, "visibility": 0.9 },
        { "name": "right_shoulder", "x": 0.38, "y": 0.45, "visibility": 0.9 },
        { "name": "left_hip", "x": 0.6, "y": 0.85, "visibility": 0.9 },
        { "name": "right_hip", "x": 0.4, "y": 0.85, "visibility": 0.9 }
    ])
}

pub fn upright_set() -> LandmarkSet {
    [
        (BodyPart::LeftEar, Landmark::new(352.0, 120.0, 0.9)),
        (BodyPart::RightEar, Landmark::new(288.0, 120.0, 0.9)),
        (BodyPart::LeftShoulder, Landmark::new(397.0, 216.0, 0.9)),
        (BodyPart::RightShoulder, Landmark::new(243.0, 216.0, 0.9)),
        (BodyPart::LeftHip, Landmark::new(384.0, 408.0, 0.9)),
        (BodyPart::RightHip, Landmark::new(256.0, 408.0, 0.9)),
    ]
    .into_iter()
    .collect()
}

pub fn png_base64(width: u32, height: u32) -> String {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 120, 150]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    base64::engine::general_purpose::STANDARD.encode(buf)
}
