use thiserror::Error;

use crate::core::types::SiteId;

#[derive(Error, Debug)]
pub enum AshesError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown concealment site: {0:?}")]
    UnknownSite(SiteId),

    #[error("Duplicate concealment site: {0:?}")]
    DuplicateSite(SiteId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AshesError>;
