use proptest::prelude::*;

use posture_backend::posture::angles::extract_angles;
use posture_backend::posture::{AngleSet, BodyPart, Landmark, LandmarkSet, Metric, PostureEngine, PostureStatus};

fn frame_with_shoulder_drop(dy: f64, flip: bool) -> LandmarkSet {
    let (left_x, right_x) = if flip { (240.0, 400.0) } else { (400.0, 240.0) };
    [
        (BodyPart::LeftEar, Landmark::new(350.0, 120.0, 0.9)),
        (BodyPart::RightEar, Landmark::new(290.0, 120.0, 0.9)),
        (BodyPart::LeftShoulder, Landmark::new(left_x, 220.0 + dy, 0.9)),
        (BodyPart::RightShoulder, Landmark::new(right_x, 220.0, 0.9)),
        (BodyPart::LeftHip, Landmark::new(380.0, 420.0, 0.9)),
        (BodyPart::RightHip, Landmark::new(260.0, 420.0, 0.9)),
    ]
    .into_iter()
    .collect()
}

fn angle_strategy() -> impl Strategy<Value = f64> {
    0.0_f64..90.0
}

proptest! {
    #[test]
    fn pt_score_never_rises_when_an_angle_worsens(
        shoulder in angle_strategy(),
        neck in angle_strategy(),
        head in angle_strategy(),
        spine in angle_strategy(),
        metric_index in 0_usize..4,
        extra in 0.0_f64..45.0,
    ) {
        let engine = PostureEngine::default();
        let metric = Metric::ALL[metric_index];
        let base = AngleSet::new(shoulder, neck, head, spine);
        let worse = base.with(metric, base.get(metric) + extra);

        let before = engine.score(base, 100.0);
        let after = engine.score(worse, 100.0);
        prop_assert!(after.posture_score <= before.posture_score);
        prop_assert!(after.feedback.len() >= before.feedback.len());
    }

    #[test]
    fn pt_score_and_status_stay_consistent(
        shoulder in -10.0_f64..200.0,
        neck in -10.0_f64..200.0,
        head in -10.0_f64..200.0,
        spine in -10.0_f64..200.0,
        confidence in 0.0_f64..100.0,
    ) {
        let result = PostureEngine::default().score(AngleSet::new(shoulder, neck, head, spine), confidence);
        prop_assert!(result.posture_score <= 100);
        prop_assert_eq!(result.posture_status, PostureStatus::from_score(result.posture_score));
        prop_assert!(result.feedback.len() <= 4);
        prop_assert_eq!(result.feedback.is_empty(), result.posture_score == 100);
    }

    #[test]
    fn pt_confidence_never_changes_the_score(
        shoulder in angle_strategy(),
        neck in angle_strategy(),
        a in 0.0_f64..100.0,
        b in 0.0_f64..100.0,
    ) {
        let engine = PostureEngine::default();
        let angles = AngleSet::new(shoulder, neck, 0.0, 0.0);
        prop_assert_eq!(engine.score(angles, a).posture_score, engine.score(angles, b).posture_score);
    }

    #[test]
    fn pt_shoulder_angle_monotone_in_height_difference(
        dy in 0.0_f64..150.0,
        step in 1.0_f64..50.0,
        flip in any::<bool>(),
    ) {
        let low = extract_angles(&frame_with_shoulder_drop(dy, flip), 0.3).unwrap().shoulder_angle;
        let high = extract_angles(&frame_with_shoulder_drop(dy + step, flip), 0.3).unwrap().shoulder_angle;
        prop_assert!(high >= low);
    }

    #[test]
    fn pt_shoulder_angle_ignores_direction(dy in -150.0_f64..150.0) {
        let normal = extract_angles(&frame_with_shoulder_drop(dy, false), 0.3).unwrap();
        let flipped = extract_angles(&frame_with_shoulder_drop(dy, true), 0.3).unwrap();
        prop_assert_eq!(normal.shoulder_angle, flipped.shoulder_angle);
    }
}

#[test]
fn level_shoulders_measure_zero() {
    let angles = extract_angles(&frame_with_shoulder_drop(0.0, false), 0.3).unwrap();
    assert_eq!(angles.shoulder_angle, 0.0);
}
