use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::posture::{AngleSet, PostureStatus, ScoreResult};
use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Frame,
    MockSession,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureRecord {
    pub id: String,
    pub user_id: String,
    pub source: RecordSource,
    /// Absent for mock sessions, which only carry an aggregate score.
    pub angles: Option<AngleSet>,
    pub posture_score: u8,
    pub posture_status: PostureStatus,
    pub confidence: f64,
    pub feedback: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl PostureRecord {
    pub fn from_score(user_id: &str, result: &ScoreResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            source: RecordSource::Frame,
            angles: Some(result.angles),
            posture_score: result.posture_score,
            posture_status: result.posture_status,
            confidence: result.confidence,
            feedback: result.feedback.clone(),
            sample_count: None,
            created_at,
        }
    }

    pub fn mock_session(
        user_id: &str,
        avg_score: u8,
        sample_count: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            source: RecordSource::MockSession,
            angles: None,
            posture_score: avg_score,
            posture_status: PostureStatus::from_score(avg_score),
            confidence: 100.0,
            feedback: vec![format!(
                "Mock interview session · {sample_count} samples · avg score {avg_score}"
            )],
            sample_count: Some(sample_count),
            created_at,
        }
    }
}

impl Store {
    pub fn create_posture_record(&self, record: &PostureRecord) -> Result<(), StoreError> {
        if record.posture_score > 100 {
            return Err(StoreError::Validation(format!(
                "posture score {} is out of range",
                record.posture_score
            )));
        }

        let key = keys::posture_record_key(
            &record.user_id,
            record.created_at.timestamp_millis(),
            &record.id,
        );
        self.posture_records
            .insert(key.as_bytes(), Self::serialize(record)?)?;
        Ok(())
    }

    pub fn get_user_posture_record(
        &self,
        user_id: &str,
        record_id: &str,
    ) -> Result<PostureRecord, StoreError> {
        let prefix = keys::posture_record_prefix(user_id);
        let suffix = keys::record_id_suffix(record_id);

        for item in self.posture_records.scan_prefix(prefix.as_bytes()) {
            let (key, value) = item?;
            if key.ends_with(suffix.as_bytes()) {
                return Self::deserialize(&value);
            }
        }

        Err(StoreError::NotFound {
            entity: "posture_record".to_string(),
            key: record_id.to_string(),
        })
    }

    /// Newest first.
    pub fn get_user_posture_records(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<PostureRecord>, StoreError> {
        self.get_user_posture_records_with_offset(user_id, limit, 0)
    }

    pub fn get_user_posture_records_with_offset(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<PostureRecord>, StoreError> {
        let prefix = keys::posture_record_prefix(user_id);
        let mut records = Vec::new();
        for item in self
            .posture_records
            .scan_prefix(prefix.as_bytes())
            .skip(offset)
        {
            if records.len() >= limit {
                break;
            }
            let (_, value) = item?;
            records.push(Self::deserialize::<PostureRecord>(&value)?);
        }
        Ok(records)
    }

    pub fn count_user_posture_records(&self, user_id: &str) -> Result<usize, StoreError> {
        let prefix = keys::posture_record_prefix(user_id);
        let mut count = 0usize;
        for item in self.posture_records.scan_prefix(prefix.as_bytes()) {
            let _ = item?;
            count += 1;
        }
        Ok(count)
    }

    pub fn count_all_posture_records(&self) -> Result<usize, StoreError> {
        Ok(self.posture_records.len())
    }
}
