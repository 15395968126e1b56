use switchboard_resource_api::ResourceError;
use thiserror::Error;

use crate::config::ConfigLoadError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
