use std::path::PathBuf;

use thiserror::Error;

use crate::practice_engine::models::CategoryId;

/// Errors from the fallible edges of the crate: parsing category labels and
/// loading policy configuration. Problem generation itself never fails.
#[derive(Debug, Error)]
pub enum PracticeError {
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("invalid policy for category {category}: {reason}")]
    InvalidPolicy { category: CategoryId, reason: String },

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse policy config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
