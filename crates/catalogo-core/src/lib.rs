pub mod app_config;
pub mod catalog;
pub mod categories;
pub mod config;

pub use app_config::AppConfig;
pub use catalog::{
    CatalogDocument, CategoryDefinition, CategoryDefinitions, PricingTier, Product, Variant,
};
pub use categories::{
    builtin_categories, humanize_code, load_categories, synthesize_definition, CategoriesFile,
    CategoryConfig,
};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("categories validation failed: {0}")]
    Validation(String),
}
