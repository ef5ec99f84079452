use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::posture::{Metric, PostureStatus};
use crate::store::operations::posture_records::{PostureRecord, RecordSource};

pub fn report_filename(record_id: &str) -> String {
    format!("posture-report-{record_id}.txt")
}

fn metric_label(metric: Metric) -> &'static str {
    match metric {
        Metric::Shoulder => "Shoulder angle",
        Metric::Neck => "Neck angle",
        Metric::Head => "Head tilt",
        Metric::Spine => "Spine angle",
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

/// Plain-text report for one stored analysis.
pub fn render(record: &PostureRecord, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "POSTURE ANALYSIS REPORT");
    let _ = writeln!(out, "=======================");
    let _ = writeln!(out);
    let _ = writeln!(out, "User:       {}", record.user_id);
    let _ = writeln!(out, "Date:       {}", record.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Record ID:  {}", record.id);
    let source = match record.source {
        RecordSource::Frame => "Frame analysis".to_string(),
        RecordSource::MockSession => format!(
            "Mock interview session ({} samples)",
            record.sample_count.unwrap_or(0)
        ),
    };
    let _ = writeln!(out, "Source:     {source}");
    let _ = writeln!(out);

    heading(&mut out, "RESULT");
    let _ = writeln!(out, "Posture score:  {}/100", record.posture_score);
    let _ = writeln!(out, "Status:         {}", record.posture_status);
    let _ = writeln!(out, "Confidence:     {:.1}%", record.confidence);
    let _ = writeln!(out);

    heading(&mut out, "ANGLES");
    for metric in Metric::ALL {
        let value = record
            .angles
            .map(|angles| format!("{:.2} deg", angles.get(metric)))
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(out, "{:<16}{value}", format!("{}:", metric_label(metric)));
    }
    let _ = writeln!(out);

    heading(&mut out, "FEEDBACK");
    if record.feedback.is_empty() {
        let _ = writeln!(out, "- Posture within ideal ranges. Keep it up.");
    }
    for line in &record.feedback {
        let _ = writeln!(out, "- {line}");
    }
    let _ = writeln!(out);

    heading(&mut out, "SCORING REFERENCE");
    let _ = writeln!(out, "{:<16}{:<12}{}", "Metric", "Ideal", "Acceptable");
    for metric in Metric::ALL {
        let t = metric.thresholds();
        let _ = writeln!(
            out,
            "{:<16}{:<12}{}",
            metric_label(metric),
            format!("< {:.0} deg", t.ideal_below),
            format!("{:.0}-{:.0} deg", t.ideal_below, t.acceptable_up_to),
        );
    }
    let _ = writeln!(
        out,
        "Status: 85+ {}, 65-84 {}, 45-64 {}, below 45 {}",
        PostureStatus::Excellent,
        PostureStatus::Good,
        PostureStatus::NeedsImprovement,
        PostureStatus::Poor,
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated at {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));

    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::posture::{AngleSet, PostureEngine};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 14, 30, 0).unwrap()
    }

    #[test]
    fn frame_report_lists_angles_and_feedback() {
        let result = PostureEngine::default().score(AngleSet::new(13.0, 3.5, 1.0, 2.0), 88.0);
        let record = PostureRecord::from_score("candidate", &result, at());
        let text = render(&record, at());

        assert!(text.starts_with("POSTURE ANALYSIS REPORT"));
        assert!(text.contains("User:       candidate"));
        assert!(text.contains("Posture score:  75/100"));
        assert!(text.contains("Status:         Good"));
        assert!(text.contains("Confidence:     88.0%"));
        assert!(text.contains("Shoulder angle: 13.00 deg"));
        assert!(text.contains("- Uneven shoulders detected."));
        assert!(text.contains("Neck angle      < 10 deg    10-20 deg"));
        assert!(text.contains("Generated at 2026-05-04 14:30:00 UTC"));
    }

    #[test]
    fn mock_session_report_has_no_angles() {
        let record = PostureRecord::mock_session("candidate", 58, 300, at());
        let text = render(&record, at());
        assert!(text.contains("Spine angle:    n/a"));
        assert!(text.contains("Mock interview session (300 samples)"));
        assert!(text.contains("Status:         Needs Improvement"));
    }

    #[test]
    fn filename_uses_record_id() {
        assert_eq!(report_filename("abc"), "posture-report-abc.txt");
    }
}
