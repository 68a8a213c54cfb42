//! Test images written into throwaway directories.

use std::path::{Path, PathBuf};

use block_mosaic::{PixelBuffer, Rgb};
use mosaic::services::save_image;
use tempfile::TempDir;

pub const RED: Rgb = Rgb::new(255, 0, 0);

/// Temporary directory holding input images and run outputs.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `buffer` as `name` and return its path.
    pub fn write_image(&self, name: &str, buffer: &PixelBuffer) -> PathBuf {
        let path = self.join(name);
        save_image(buffer, &path).expect("Failed to write fixture image");
        path
    }

    /// Solid `width` x `height` image of one color.
    pub fn solid(&self, name: &str, width: usize, height: usize, color: Rgb) -> PathBuf {
        let buffer = PixelBuffer::filled(width, height, color).expect("valid dimensions");
        self.write_image(name, &buffer)
    }

    /// Image whose every pixel differs from its neighbours.
    pub fn gradient(&self, name: &str, width: usize, height: usize) -> PathBuf {
        self.write_image(name, &gradient(width, height))
    }
}

/// Deterministic gradient pattern.
pub fn gradient(width: usize, height: usize) -> PixelBuffer {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                Rgb::new(
                    (x * 255 / width.max(1)) as u8,
                    (y * 255 / height.max(1)) as u8,
                    ((x * 7 + y * 13) % 256) as u8,
                )
            })
        })
        .collect();
    PixelBuffer::from_pixels(width, height, pixels).expect("valid dimensions")
}
