use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::detector::LandmarkDetector;
use crate::posture::PostureEngine;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    engine: Arc<PostureEngine>,
    detector: Arc<dyn LandmarkDetector>,
    config: Arc<Config>,
    started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>, detector: Arc<dyn LandmarkDetector>, config: &Config) -> Self {
        let engine = Arc::new(PostureEngine::new(config.engine.engine_config()));
        Self {
            store,
            engine,
            detector,
            config: Arc::new(config.clone()),
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn engine(&self) -> &PostureEngine {
        &self.engine
    }

    pub fn detector(&self) -> &dyn LandmarkDetector {
        self.detector.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
