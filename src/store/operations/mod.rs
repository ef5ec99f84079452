pub mod posture_records;
