//! Screenshot capture for Screenshot List
//!
//! Owns the [`Screenshot`] item type, picks file names for new shots, and on
//! Windows grabs the primary screen through GDI.

#[cfg(windows)]
pub mod gdi;
pub mod naming;
pub mod screenshot;

pub use naming::unique_shot_path;
pub use screenshot::Screenshot;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("GDI call failed: {0}")]
    Gdi(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("No unused screenshot file name in {}", .0.display())]
    NoFreeName(PathBuf),

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    PixelSize { expected: usize, actual: usize },
}

pub type CaptureResult<T> = Result<T, CaptureError>;
