//! Command implementations.

pub mod cart;
pub mod catalog;

use foodverse_core::PayloadError;
use foodverse_storefront::config::ConfigError;
use foodverse_storefront::products::ProductSourceError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// Product payload was not usable.
    #[error("Invalid product payload: {0}")]
    Payload(#[from] PayloadError),

    /// Input file was not valid JSON of the expected shape.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Product API request failed.
    #[error("Product API error: {0}")]
    Source(#[from] ProductSourceError),
}

/// Read a whole file, naming the path on failure.
fn read_file(path: &std::path::Path) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.display().to_string(),
        source,
    })
}
