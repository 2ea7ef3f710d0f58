pub mod app_config;
pub mod config;
pub mod place;
pub mod synthetic;

pub use app_config::{AppConfig, SearchRadius};
pub use config::{load_app_config, load_app_config_from_env};
pub use place::{Coordinate, Place};
pub use synthetic::{is_synthetic, synthetic_restaurants};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("config validation error: {0}")]
    Validation(String),
}
