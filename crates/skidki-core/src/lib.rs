pub mod app_config;
pub mod config;
pub mod merchants;
pub mod products;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use merchants::{
    default_merchants, load_merchants, MerchantRegistry, MerchantSource, BACK_TO_STORES_TOKEN,
};
pub use products::{Money, ProductRecord, Section, SectionMap};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read merchants file {path}: {source}")]
    MerchantsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse merchants file: {0}")]
    MerchantsFileParse(#[from] serde_yaml::Error),

    #[error("merchant validation failed: {0}")]
    Validation(String),
}
