use serde::Serialize;

use crate::constants::CHART_WINDOW;
use crate::posture::round_to;
use crate::store::operations::posture_records::PostureRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub score: u8,
}

/// Dashboard aggregates over a user's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostureSummary {
    pub total_sessions: usize,
    pub avg_score: f64,
    pub latest: Option<PostureRecord>,
    /// Percent change from the first to the latest score.
    pub improvement: f64,
    /// Most recent sessions, oldest first.
    pub chart: Vec<ChartPoint>,
}

/// `records` must be ordered newest first, as the store returns them.
pub fn summarize(records: &[PostureRecord]) -> PostureSummary {
    let total_sessions = records.len();
    let avg_score = if records.is_empty() {
        0.0
    } else {
        let sum: u64 = records.iter().map(|r| u64::from(r.posture_score)).sum();
        round_to(sum as f64 / total_sessions as f64, 1)
    };

    let improvement = match (records.first(), records.last()) {
        (Some(latest), Some(first)) if total_sessions >= 2 && first.posture_score > 0 => {
            let first_score = f64::from(first.posture_score);
            round_to(
                (f64::from(latest.posture_score) - first_score) / first_score * 100.0,
                1,
            )
        }
        _ => 0.0,
    };

    let chart = records
        .iter()
        .take(CHART_WINDOW)
        .rev()
        .map(|r| ChartPoint {
            label: r.created_at.format("%Y-%m-%d %H:%M").to_string(),
            score: r.posture_score,
        })
        .collect();

    PostureSummary {
        total_sessions,
        avg_score,
        latest: records.first().cloned(),
        improvement,
        chart,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    /// Builds newest-first records from scores listed oldest first.
    fn history(scores: &[u8]) -> Vec<PostureRecord> {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let mut records: Vec<PostureRecord> = scores
            .iter()
            .enumerate()
            .map(|(i, score)| {
                PostureRecord::mock_session("u1", *score, 10, start + Duration::minutes(i as i64))
            })
            .collect();
        records.reverse();
        records
    }

    #[test]
    fn empty_history_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.avg_score, 0.0);
        assert_eq!(summary.improvement, 0.0);
        assert!(summary.latest.is_none());
        assert!(summary.chart.is_empty());
    }

    #[test]
    fn single_session_has_no_improvement() {
        let summary = summarize(&history(&[70]));
        assert_eq!(summary.total_sessions, 1);
        assert_eq!(summary.avg_score, 70.0);
        assert_eq!(summary.improvement, 0.0);
    }

    #[test]
    fn improvement_compares_first_and_latest() {
        let summary = summarize(&history(&[60, 50, 75]));
        assert_eq!(summary.improvement, 25.0);
        assert_eq!(summary.avg_score, 61.7);
        assert_eq!(summary.latest.as_ref().unwrap().posture_score, 75);

        let worse = summarize(&history(&[80, 60]));
        assert_eq!(worse.improvement, -25.0);
    }

    #[test]
    fn zero_first_score_does_not_divide() {
        assert_eq!(summarize(&history(&[0, 90])).improvement, 0.0);
    }

    #[test]
    fn chart_holds_last_ten_in_chronological_order() {
        let scores: Vec<u8> = (0..15).map(|i| 50 + i).collect();
        let summary = summarize(&history(&scores));
        assert_eq!(summary.chart.len(), 10);
        assert_eq!(summary.chart[0].score, 55);
        assert_eq!(summary.chart[9].score, 64);
        assert_eq!(summary.chart[0].label, "2026-03-01 09:05");
    }
}
