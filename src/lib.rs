pub mod config;
pub mod constants;
pub mod detector;
pub mod extractors;
pub mod identity;
pub mod logging;
pub mod middleware;
pub mod posture;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;
