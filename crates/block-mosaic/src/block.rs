//! Block geometry and the averaging kernel.
//!
//! A block is a rectangle on the `square_size` grid, truncated where it runs
//! past the right edge of the image or the end of the band being processed.
//! [`average_block`] is the whole transform for one block: sum, divide,
//! overwrite.

use std::ops::Range;

use crate::buffer::{Rgb, RowBand};

/// A rectangle `[x_start, x_end) x [y_start, y_end)` in absolute image
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub x_start: usize,
    pub x_end: usize,
    pub y_start: usize,
    pub y_end: usize,
}

impl Block {
    #[inline]
    pub fn width(&self) -> usize {
        self.x_end - self.x_start
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y_end - self.y_start
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Whether `(x, y)` lies inside the block.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x_start..self.x_end).contains(&x) && (self.y_start..self.y_end).contains(&y)
    }
}

/// Row-major iterator over the blocks covering `rows` of an image `width`
/// pixels wide.
///
/// Blocks start at `(0, rows.start)` and step by `square_size` in both axes.
/// The last column is clamped to `width` and the last row to `rows.end`, so
/// a grid never reaches outside the rows it was built for.
///
/// # Example
///
/// ```
/// use block_mosaic::BlockGrid;
///
/// let sizes: Vec<_> = BlockGrid::new(10, 0..10, 4)
///     .map(|b| (b.width(), b.height()))
///     .collect();
///
/// assert_eq!(
///     sizes,
///     vec![(4, 4), (4, 4), (2, 4), (4, 4), (4, 4), (2, 4), (4, 2), (4, 2), (2, 2)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BlockGrid {
    width: usize,
    rows: Range<usize>,
    square_size: usize,
    next_x: usize,
    next_y: usize,
}

impl BlockGrid {
    /// # Panics
    ///
    /// Panics if `square_size` is zero.
    pub fn new(width: usize, rows: Range<usize>, square_size: usize) -> Self {
        assert!(square_size > 0, "square size must be positive");
        Self {
            width,
            next_y: rows.start,
            rows,
            square_size,
            next_x: 0,
        }
    }

    /// Total number of blocks the grid yields.
    pub fn block_count(width: usize, rows: Range<usize>, square_size: usize) -> usize {
        assert!(square_size > 0, "square size must be positive");
        width.div_ceil(square_size) * rows.len().div_ceil(square_size)
    }
}

impl Iterator for BlockGrid {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.width == 0 || self.next_y >= self.rows.end {
            return None;
        }
        let block = Block {
            x_start: self.next_x,
            x_end: (self.next_x + self.square_size).min(self.width),
            y_start: self.next_y,
            y_end: (self.next_y + self.square_size).min(self.rows.end),
        };
        self.next_x = block.x_end;
        if self.next_x >= self.width {
            self.next_x = 0;
            self.next_y = block.y_end;
        }
        Some(block)
    }
}

/// Per-channel truncated mean of the samples inside `block`.
///
/// Sums use `u64` accumulators, so no realistic block can overflow. Division
/// truncates: channel values `{10, 11, 12, 13}` average to `11`, not `12`.
///
/// # Panics
///
/// Panics if the block is empty or not fully inside `band`.
pub fn average_color(band: &RowBand<'_>, block: &Block) -> Rgb {
    check_inside(band, block);

    let (mut red, mut green, mut blue) = (0u64, 0u64, 0u64);
    for y in block.y_start..block.y_end {
        for px in &band.row(y)[block.x_start..block.x_end] {
            red += u64::from(px.r);
            green += u64::from(px.g);
            blue += u64::from(px.b);
        }
    }

    let count = block.pixel_count() as u64;
    // Each quotient is a mean of u8 values, so it fits in u8.
    Rgb::new(
        (red / count) as u8,
        (green / count) as u8,
        (blue / count) as u8,
    )
}

/// Overwrite every sample inside `block` with `color`.
///
/// # Panics
///
/// Panics if the block is empty or not fully inside `band`.
pub fn fill_block(band: &mut RowBand<'_>, block: &Block, color: Rgb) {
    check_inside(band, block);
    for y in block.y_start..block.y_end {
        band.row_mut(y)[block.x_start..block.x_end].fill(color);
    }
}

/// Replace `block` with its average color and return that color.
///
/// All samples are read before any is written.
pub fn average_block(band: &mut RowBand<'_>, block: &Block) -> Rgb {
    let color = average_color(band, block);
    fill_block(band, block, color);
    color
}

fn check_inside(band: &RowBand<'_>, block: &Block) {
    let rows = band.row_range();
    assert!(
        block.x_start < block.x_end
            && block.x_end <= band.width()
            && block.y_start < block.y_end
            && rows.start <= block.y_start
            && block.y_end <= rows.end,
        "block {block:?} outside band (width {}, rows {rows:?})",
        band.width()
    );
}
