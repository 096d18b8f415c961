use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the sketchpad configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised while rasterizing, encoding or saving an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to allocate a {width}x{height} export buffer")]
    Allocation { width: u32, height: u32 },

    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser refused the download: {0}")]
    Browser(String),
}
