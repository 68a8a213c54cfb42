//! Decoding source images into pixel buffers and encoding results.

use std::path::Path;

use block_mosaic::PixelBuffer;

use crate::error::{AppError, SaveError};

/// Decode any format the `image` crate understands into an RGB buffer.
///
/// Alpha and higher bit depths are dropped by the conversion to 8-bit RGB.
pub fn load_image(path: &Path) -> Result<PixelBuffer, AppError> {
    let load_error = |reason: String| AppError::Load {
        path: path.to_path_buf(),
        reason,
    };

    let rgb = image::open(path)
        .map_err(|e| load_error(e.to_string()))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();

    PixelBuffer::from_rgb_bytes(width as usize, height as usize, rgb.as_raw())
        .map_err(|e| load_error(e.to_string()))
}

/// Encode `buffer` to `path`; the format follows the file extension.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<(), SaveError> {
    let too_large = || SaveError::UnsupportedDimensions {
        width: buffer.width(),
        height: buffer.height(),
    };
    let width = u32::try_from(buffer.width()).map_err(|_| too_large())?;
    let height = u32::try_from(buffer.height()).map_err(|_| too_large())?;

    let rgb = image::RgbImage::from_raw(width, height, buffer.to_rgb_bytes())
        .ok_or_else(too_large)?;
    rgb.save(path)?;
    tracing::debug!(path = %path.display(), width, height, "Saved result");
    Ok(())
}
