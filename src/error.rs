use std::path::PathBuf;

use block_mosaic::MosaicError;
use thiserror::Error;

/// Fatal failures of a mosaic run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("Unable to load image file {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Transform failed: {0}")]
    Transform(#[from] MosaicError),

    #[error("Transform task failed: {0}")]
    Task(String),
}

impl AppError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Load { .. } | AppError::Transform(_) | AppError::Task(_) => 1,
        }
    }
}

impl From<clap::Error> for AppError {
    fn from(e: clap::Error) -> Self {
        AppError::Usage(e.to_string())
    }
}

/// Encoding or writing the result failed. Not fatal: the transform itself
/// succeeded.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Image too large to encode: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("{0}")]
    Encode(#[from] image::ImageError),
}
