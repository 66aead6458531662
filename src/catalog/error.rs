use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Message shown in place of the grid when the primary list call fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    Parse(String),
    #[error("Drink {0} not found")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl CatalogError {
    /// Human-readable text for the rendering boundary.
    pub fn display_message(&self) -> String {
        match self {
            Self::Transport(_) | Self::Parse(_) => FETCH_FAILED_MESSAGE.to_string(),
            Self::NotFound(_) => "Drink details are not available".to_string(),
            Self::Storage(_) => "Could not save your changes".to_string(),
            Self::InvalidUrl(_) => "The drink service address is misconfigured".to_string(),
            Self::Config(_) => "The catalog settings are invalid".to_string(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Transport("request timed out".into())
        } else if err.is_connect() {
            CatalogError::Transport("network unavailable".into())
        } else if err.is_decode() {
            CatalogError::Parse(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
