pub mod address;
pub mod app_config;
pub mod config;
pub mod review;

pub use address::{AddressField, LatLng, OverrideFlags, ResolvedAddress};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use review::{
    upload_path, RatingCategory, Ratings, ReviewDraft, ReviewError, ReviewSubmission,
    RATING_CATEGORIES,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
