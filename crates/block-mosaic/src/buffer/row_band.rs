//! Mutable view over a run of full-width rows.

use std::ops::Range;

use super::rgb::Rgb;

/// A mutable borrow of rows `first_row..first_row + rows` of a
/// [`PixelBuffer`](super::PixelBuffer).
///
/// Row indices passed to a band are absolute image rows, so block
/// rectangles keep the same coordinates whichever band they are applied to.
/// Bands are split with `split_at_mut`, which is what lets several workers
/// mutate one image concurrently without locks.
#[derive(Debug)]
pub struct RowBand<'a> {
    pixels: &'a mut [Rgb],
    width: usize,
    first_row: usize,
    rows: usize,
}

impl<'a> RowBand<'a> {
    pub(crate) fn new(pixels: &'a mut [Rgb], width: usize, first_row: usize) -> Self {
        debug_assert!(width > 0 && pixels.len() % width == 0);
        let rows = pixels.len() / width;
        Self {
            pixels,
            width,
            first_row,
            rows,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows in the band.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Absolute image rows covered by the band.
    #[inline]
    pub fn row_range(&self) -> Range<usize> {
        self.first_row..self.first_row + self.rows
    }

    /// Samples of absolute row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not inside [`row_range`](Self::row_range).
    #[inline]
    pub fn row(&self, y: usize) -> &[Rgb] {
        let start = self.offset(y);
        &self.pixels[start..start + self.width]
    }

    /// Mutable samples of absolute row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not inside [`row_range`](Self::row_range).
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [Rgb] {
        let start = self.offset(y);
        &mut self.pixels[start..start + self.width]
    }

    /// Split into `[first_row, at)` and `[at, end)`, consuming the band.
    ///
    /// # Panics
    ///
    /// Panics if `at` lies outside `first_row..=end`.
    pub fn split_at_row(self, at: usize) -> (RowBand<'a>, RowBand<'a>) {
        let range = self.row_range();
        assert!(
            range.start <= at && at <= range.end,
            "split row {at} outside band rows {range:?}"
        );
        let RowBand {
            pixels,
            width,
            first_row,
            ..
        } = self;
        let (head, tail) = pixels.split_at_mut((at - first_row) * width);
        (
            RowBand::new(head, width, first_row),
            RowBand::new(tail, width, at),
        )
    }

    #[inline]
    fn offset(&self, y: usize) -> usize {
        assert!(
            self.row_range().contains(&y),
            "row {y} outside band rows {:?}",
            self.row_range()
        );
        (y - self.first_row) * self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, rows: usize) -> Vec<Rgb> {
        (0..width * rows)
            .map(|i| Rgb::new(i as u8, 0, 0))
            .collect()
    }

    #[test]
    fn test_rows_use_absolute_indices() {
        let mut pixels = numbered(2, 3);
        let band = RowBand::new(&mut pixels[2..], 2, 1);
        assert_eq!(band.row_range(), 1..3);
        assert_eq!(band.row(1)[0].r, 2);
        assert_eq!(band.row(2)[1].r, 5);
    }

    #[test]
    fn test_split_at_row() {
        let mut pixels = numbered(2, 4);
        let band = RowBand::new(&mut pixels, 2, 0);
        let (mut top, bottom) = band.split_at_row(1);

        assert_eq!(top.row_range(), 0..1);
        assert_eq!(bottom.row_range(), 1..4);
        assert_eq!(bottom.row(1)[0].r, 2);

        top.row_mut(0)[1] = Rgb::new(99, 0, 0);
        assert_eq!(pixels[1].r, 99);
    }

    #[test]
    fn test_split_at_edges_gives_empty_band() {
        let mut pixels = numbered(3, 2);
        let band = RowBand::new(&mut pixels, 3, 0);
        let (all, empty) = band.split_at_row(2);
        assert_eq!(all.rows(), 2);
        assert_eq!(empty.rows(), 0);
        assert_eq!(empty.row_range(), 2..2);
    }

    #[test]
    #[should_panic(expected = "outside band rows")]
    fn test_row_outside_band_panics() {
        let mut pixels = numbered(2, 2);
        let band = RowBand::new(&mut pixels, 2, 5);
        band.row(4);
    }
}
