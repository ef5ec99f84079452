use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use posture_backend::config::{Config, EngineEnvConfig, PoseDetectorConfig};
use posture_backend::detector::{DetectorError, DisabledDetector, ImageFrame, LandmarkDetector};
use posture_backend::posture::Detection;
use posture_backend::routes::build_router;
use posture_backend::state::AppState;
use posture_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

/// Answers every frame with the same canned result.
pub struct StubDetector {
    pub reply: Result<Detection, DetectorError>,
}

#[axum::async_trait]
impl LandmarkDetector for StubDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn detect(&self, _frame: &ImageFrame) -> Result<Detection, DetectorError> {
        self.reply.clone()
    }
}

fn test_config(sled_path: String) -> Config {
    // Built directly to keep parallel tests away from process-wide env vars.
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path,
        cors_origin: "http://localhost:5173".to_string(),
        max_body_bytes: 1024 * 1024,
        pose_detector: PoseDetectorConfig {
            enabled: false,
            service_url: String::new(),
            timeout_secs: 5,
        },
        engine: EngineEnvConfig {
            min_landmark_visibility: 0.3,
            low_confidence_threshold: 50.0,
        },
    }
}

pub async fn spawn_with_detector(detector: Arc<dyn LandmarkDetector>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("posture-test.sled");
    let config = test_config(sled_path.to_string_lossy().to_string());

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    store.run_migrations().expect("run migrations");

    let state = AppState::new(store, detector, &config);
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}

pub async fn spawn_test_app() -> TestApp {
    spawn_with_detector(Arc::new(DisabledDetector)).await
}

pub async fn spawn_with_stub(reply: Result<Detection, DetectorError>) -> TestApp {
    spawn_with_detector(Arc::new(StubDetector { reply })).await
}
