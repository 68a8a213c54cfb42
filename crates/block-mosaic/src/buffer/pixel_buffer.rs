//! Owned RGB raster transformed in place by the mosaic engine.

use super::error::BufferError;
use super::rgb::Rgb;
use super::row_band::RowBand;
use crate::partition::Partition;

/// An owned, mutable 2-D grid of RGB samples in row-major order.
///
/// `PixelBuffer` is the only piece of mutable state the engine touches. The
/// caller owns it; a transform borrows it mutably for the duration of the
/// call and keeps nothing afterward.
///
/// Width and height are always non-zero, so every buffer holds at least one
/// block.
///
/// # Example
///
/// ```
/// use block_mosaic::{PixelBuffer, Rgb};
///
/// let mut buffer = PixelBuffer::filled(3, 2, Rgb::new(10, 20, 30)).unwrap();
/// buffer.set(2, 1, Rgb::new(255, 255, 255));
///
/// assert_eq!(buffer.width(), 3);
/// assert_eq!(buffer.height(), 2);
/// assert_eq!(buffer.get(2, 1), Some(Rgb::new(255, 255, 255)));
/// assert_eq!(buffer.get(3, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Samples, `width * height` of them, row-major.
    pixels: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Create a buffer with every sample set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, BufferError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            pixels: vec![color; len],
            width,
            height,
        })
    }

    /// Wrap existing samples.
    ///
    /// `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, BufferError> {
        let expected = checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build a buffer from interleaved `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// This is the layout image decoders hand out for 8-bit RGB.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, BufferError> {
        let expected = checked_len(width, height)?
            .checked_mul(3)
            .ok_or(BufferError::TooLarge { width, height })?;
        if bytes.len() != expected {
            return Err(BufferError::ByteLengthMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Interleaved `[R, G, B, ...]` bytes, `width * height * 3` long.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            bytes.extend_from_slice(&px.to_bytes());
        }
        bytes
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All samples in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Sample at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Overwrite the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        self.pixels[y * self.width + x] = color;
    }

    /// Borrow the whole image as a single band.
    pub fn as_band(&mut self) -> RowBand<'_> {
        RowBand::new(&mut self.pixels, self.width, 0)
    }

    /// Split the image into one mutable band per partition.
    ///
    /// The partitions must tile `0..height` in order, which is what
    /// [`plan_partitions`](crate::plan_partitions) produces. Because each band
    /// is a separate `&mut` slice, workers holding different bands can never
    /// touch the same row.
    ///
    /// # Panics
    ///
    /// Panics if the partitions leave a gap, overlap, or stop short of the
    /// last row.
    pub fn split_into_bands(&mut self, partitions: &[Partition]) -> Vec<RowBand<'_>> {
        let mut rest = self.as_band();
        let mut bands = Vec::with_capacity(partitions.len());
        for partition in partitions {
            assert_eq!(
                partition.rows.start,
                rest.row_range().start,
                "partition {} does not start where the previous one ended",
                partition.index
            );
            let (head, tail) = rest.split_at_row(partition.rows.end);
            bands.push(head);
            rest = tail;
        }
        assert!(
            rest.rows() == 0,
            "partitions do not cover rows {:?}",
            rest.row_range()
        );
        bands
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, BufferError> {
    if width == 0 || height == 0 {
        return Err(BufferError::EmptyDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(BufferError::TooLarge { width, height })
}
