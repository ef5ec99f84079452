use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::constants::DEFAULT_MAX_BODY_BYTES;
use crate::posture::engine::DEFAULT_MIN_VISIBILITY;
use crate::posture::EngineConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub cors_origin: String,
    pub max_body_bytes: usize,
    pub pose_detector: PoseDetectorConfig,
    pub engine: EngineEnvConfig,
}

#[derive(Debug, Clone)]
pub struct PoseDetectorConfig {
    pub enabled: bool,
    pub service_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct EngineEnvConfig {
    pub min_landmark_visibility: f64,
    /// Results whose confidence is below this percentage are flagged.
    pub low_confidence_threshold: f64,
}

impl EngineEnvConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            min_visibility: self.min_landmark_visibility,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/posture.sled"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            max_body_bytes: env_or_parse("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
            pose_detector: PoseDetectorConfig {
                enabled: env_or_bool("POSE_DETECTOR_ENABLED", false),
                service_url: env_or("POSE_SERVICE_URL", ""),
                timeout_secs: env_or_parse("POSE_SERVICE_TIMEOUT_SECS", 10_u64),
            },
            engine: EngineEnvConfig {
                min_landmark_visibility: env_or_unit_interval(
                    "MIN_LANDMARK_VISIBILITY",
                    DEFAULT_MIN_VISIBILITY,
                ),
                low_confidence_threshold: env_or_parse("LOW_CONFIDENCE_THRESHOLD", 50.0_f64)
                    .clamp(0.0, 100.0),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

/// Like [`env_or_parse`] for values that must lie in `[0, 1]`.
pub fn env_or_unit_interval(key: &str, default: f64) -> f64 {
    let value = env_or_parse(key, default);
    if (0.0..=1.0).contains(&value) {
        value
    } else {
        tracing::warn!(key, value, "Env var outside [0, 1], using default");
        default
    }
}
