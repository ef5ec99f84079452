//! Input checks shared by the identity extractor and the posture routes.

use crate::constants::{MAX_MOCK_SESSION_SAMPLES, MAX_USER_ID_LEN};

/// Caller ids are used inside storage keys, so `:` and anything outside
/// `[A-Za-z0-9_-]` is refused.
pub fn validate_user_id(user_id: &str) -> Result<(), &'static str> {
    if user_id.is_empty() {
        return Err("User id must not be empty");
    }
    if user_id.len() > MAX_USER_ID_LEN {
        return Err("User id must be at most 128 characters");
    }
    if !user_id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err("User id may only contain letters, digits, '-' and '_'");
    }
    Ok(())
}

/// Scores of a mock session: 1 to 3600 samples, each in `0..=100`.
pub fn validate_mock_scores(scores: &[i64]) -> Result<(), String> {
    if scores.is_empty() {
        return Err("At least one score is required".to_string());
    }
    if scores.len() > MAX_MOCK_SESSION_SAMPLES {
        return Err(format!(
            "At most {MAX_MOCK_SESSION_SAMPLES} scores are allowed per session"
        ));
    }
    if let Some((index, score)) = scores
        .iter()
        .enumerate()
        .find(|(_, score)| !(0..=100).contains(*score))
    {
        return Err(format!("Score at index {index} is {score}, expected 0 to 100"));
    }
    Ok(())
}

/// Optional frame size sent along with normalized landmarks.
pub fn validate_frame_dimension(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{name} must be a positive number"));
    }
    Ok(())
}
