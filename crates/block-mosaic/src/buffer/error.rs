//! Errors raised while constructing a [`PixelBuffer`](super::PixelBuffer).

use thiserror::Error;

/// Reasons a pixel buffer could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Width or height was zero.
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    /// The sample data does not cover exactly `width * height` pixels.
    #[error("expected {expected} samples for a {width}x{height} image, got {actual}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Raw interleaved RGB data is not exactly `width * height * 3` bytes.
    #[error("expected {expected} RGB bytes for a {width}x{height} image, got {actual}")]
    ByteLengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// `width * height` does not fit in memory addressing.
    #[error("image dimensions {width}x{height} are too large")]
    TooLarge { width: usize, height: usize },
}
