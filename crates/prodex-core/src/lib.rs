pub mod app_config;
pub mod config;
pub mod feed;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use feed::{CatalogItem, Metadata, SpecMap, GUARANTEE_KEYS, SKU_LABEL};
pub use products::{
    AttributeKey, MediaId, ProductAttribute, ProductId, ProductKind, PublishStatus, RawProduct,
    StockStatus, TermId, TAXONOMY_PREFIX,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
