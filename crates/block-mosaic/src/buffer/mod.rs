//! Pixel storage for the mosaic engine.
//!
//! [`PixelBuffer`] owns the samples; [`RowBand`] is the mutable view the
//! averaging code works on. Sequential runs use one band spanning the whole
//! image, parallel runs split the buffer into one band per partition.

mod error;
mod pixel_buffer;
mod rgb;
mod row_band;

pub use error::BufferError;
pub use pixel_buffer::PixelBuffer;
pub use rgb::Rgb;
pub use row_band::RowBand;
