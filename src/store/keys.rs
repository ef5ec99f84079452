/// Newest-first key: the timestamp is stored as `u64::MAX - ts`, zero padded,
/// so a forward prefix scan walks a user's records from latest to oldest.
pub fn posture_record_key(user_id: &str, timestamp_ms: i64, record_id: &str) -> String {
    let ts = timestamp_ms.max(0) as u64;
    let reverse_ts = u64::MAX - ts;
    format!("{}:{:020}:{}", user_id, reverse_ts, record_id)
}

pub fn posture_record_prefix(user_id: &str) -> String {
    format!("{}:", user_id)
}

pub fn record_id_suffix(record_id: &str) -> String {
    format!(":{}", record_id)
}
