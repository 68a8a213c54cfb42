//! Assertion helpers for tests.

use std::path::Path;

use block_mosaic::{PixelBuffer, Rgb};
use mosaic::services::load_image;
use pretty_assertions::assert_eq;

/// Assert the image at `path` decodes to exactly `expected`.
pub fn assert_image_eq(path: &Path, expected: &PixelBuffer) {
    assert!(path.exists(), "Expected output {} to exist", path.display());
    let actual = load_image(path).expect("output should decode");
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "dimensions of {}",
        path.display()
    );
    assert_eq!(actual.pixels(), expected.pixels());
}

/// Assert every pixel in the square at (`x0`, `y0`) of side `size` is `color`.
pub fn assert_block_color(buffer: &PixelBuffer, x0: usize, y0: usize, size: usize, color: Rgb) {
    for y in y0..(y0 + size).min(buffer.height()) {
        for x in x0..(x0 + size).min(buffer.width()) {
            assert_eq!(buffer.get(x, y), Some(color), "pixel ({x}, {y})");
        }
    }
}

/// Assert no `result.*` file was written into `dir`.
pub fn assert_no_result(dir: &Path) {
    let results: Vec<_> = std::fs::read_dir(dir)
        .expect("readable dir")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("result."))
        .collect();
    assert!(results.is_empty(), "Unexpected output files: {results:?}");
}
