//! Screenshot item: pixels plus the file they live in

use crate::{CaptureError, CaptureResult};
use image::{ImageBuffer, ImageFormat, RgbImage};
use listview::Picture;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One captured or loaded screenshot.
///
/// Pixels are top-down BGRA, four bytes each, the layout GDI hands out and
/// takes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    path: PathBuf,
}

impl Screenshot {
    pub fn from_bgra(width: u32, height: u32, pixels: Vec<u8>, path: PathBuf) -> CaptureResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CaptureError::PixelSize {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// File the screenshot was saved to or loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to [`Screenshot::path`] as a 24-bit BMP, creating parent
    /// directories as needed. The alpha channel is dropped since screen
    /// captures leave it zero.
    pub fn save_bmp(&self) -> CaptureResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let rgb: Vec<u8> = self
            .pixels
            .chunks_exact(4)
            .flat_map(|bgra| [bgra[2], bgra[1], bgra[0]])
            .collect();
        let expected = self.width as usize * self.height as usize * 3;
        let actual = rgb.len();
        let img: RgbImage = ImageBuffer::from_raw(self.width, self.height, rgb)
            .ok_or(CaptureError::PixelSize { expected, actual })?;

        img.save_with_format(&self.path, ImageFormat::Bmp)?;
        debug!(path = %self.path.display(), width = self.width, height = self.height, "saved screenshot");
        Ok(())
    }

    /// Read a BMP back in.
    pub fn load_bmp(path: &Path) -> CaptureResult<Self> {
        let mut img = image::open(path)?.to_rgba8();
        for pixel in img.chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }

        let (width, height) = img.dimensions();
        Self::from_bgra(width, height, img.into_raw(), path.to_path_buf())
    }
}

impl Picture for Screenshot {
    fn pixel_size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    fn caption(&self) -> String {
        self.path.display().to_string()
    }
}
