/// Posture records keyed by `keys::posture_record_key`.
pub const POSTURE_RECORDS: &str = "posture_records";
/// Schema version and other `_meta:*` bookkeeping.
pub const META: &str = "meta";
