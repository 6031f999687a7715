//! Error type for cave generation requests.
//!
//! Everything here is a caller mistake caught before allocation. Broken
//! internal invariants (a square configuration outside 0..16) panic instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaveError {
    #[error("map dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("fill percent must be within 0..=100, got {0}")]
    FillPercentOutOfRange(u32),

    #[error("cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f32),

    #[error("a {width}x{height} map needs more mesh nodes than 32-bit indices can address")]
    GridTooLarge { width: usize, height: usize },

    #[error("failed to read config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CaveError>;
