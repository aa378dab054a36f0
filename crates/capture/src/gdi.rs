//! Primary screen capture through GDI, and the handle guards it needs
//!
//! Every acquired GDI resource is wrapped so that it is released exactly once,
//! on every path out of the function that acquired it.

use crate::naming::unique_shot_path;
use crate::{CaptureError, CaptureResult, Screenshot};
use chrono::Local;
use std::mem::size_of;
use std::path::Path;
use tracing::debug;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HBITMAP, HDC,
    HGDIOBJ, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

/// Device context for the whole screen.
pub struct ScreenDc {
    hdc: HDC,
}

impl ScreenDc {
    pub fn get() -> CaptureResult<Self> {
        let hdc = unsafe { GetDC(None) };
        if hdc.is_invalid() {
            return Err(CaptureError::Gdi("GetDC"));
        }
        Ok(Self { hdc })
    }

    pub fn hdc(&self) -> HDC {
        self.hdc
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(None, self.hdc);
        }
    }
}

/// Memory device context compatible with some other DC.
pub struct MemoryDc {
    hdc: HDC,
}

impl MemoryDc {
    pub fn compatible_with(hdc: HDC) -> CaptureResult<Self> {
        let hdc = unsafe { CreateCompatibleDC(hdc) };
        if hdc.is_invalid() {
            return Err(CaptureError::Gdi("CreateCompatibleDC"));
        }
        Ok(Self { hdc })
    }

    pub fn hdc(&self) -> HDC {
        self.hdc
    }
}

impl Drop for MemoryDc {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteDC(self.hdc);
        }
    }
}

/// Bitmap compatible with some DC.
pub struct OwnedBitmap {
    bitmap: HBITMAP,
    width: i32,
    height: i32,
}

impl OwnedBitmap {
    pub fn compatible_with(hdc: HDC, width: i32, height: i32) -> CaptureResult<Self> {
        let bitmap = unsafe { CreateCompatibleBitmap(hdc, width, height) };
        if bitmap.is_invalid() {
            return Err(CaptureError::Gdi("CreateCompatibleBitmap"));
        }
        Ok(Self { bitmap, width, height })
    }

    pub fn handle(&self) -> HBITMAP {
        self.bitmap
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Copy the pixels out as top-down BGRA. `hdc` must be compatible with
    /// the bitmap, and the bitmap must not be selected into any DC.
    pub fn bgra_pixels(&self, hdc: HDC) -> CaptureResult<Vec<u8>> {
        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: self.width,
                biHeight: -self.height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            bmiColors: [Default::default()],
        };

        let mut data = vec![0u8; self.width.max(0) as usize * self.height.max(0) as usize * 4];
        let lines = unsafe {
            GetDIBits(
                hdc,
                self.bitmap,
                0,
                self.height as u32,
                Some(data.as_mut_ptr() as *mut _),
                &mut bmi,
                DIB_RGB_COLORS,
            )
        };
        if lines == 0 {
            return Err(CaptureError::Gdi("GetDIBits"));
        }

        Ok(data)
    }
}

impl Drop for OwnedBitmap {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.bitmap);
        }
    }
}

/// Selects an object into a DC and puts the previous one back on drop.
pub struct SelectGuard {
    hdc: HDC,
    previous: HGDIOBJ,
}

impl SelectGuard {
    pub fn new(hdc: HDC, object: HGDIOBJ) -> Self {
        let previous = unsafe { SelectObject(hdc, object) };
        Self { hdc, previous }
    }
}

impl Drop for SelectGuard {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.hdc, self.previous);
        }
    }
}

/// Memory DC with its own bitmap selected in, ready to draw on.
pub struct BitmapDc {
    // Drop order matters: deselect, delete the DC, then the bitmap.
    select: SelectGuard,
    dc: MemoryDc,
    bitmap: OwnedBitmap,
}

impl BitmapDc {
    pub fn compatible_with(hdc: HDC, width: i32, height: i32) -> CaptureResult<Self> {
        let dc = MemoryDc::compatible_with(hdc)?;
        let bitmap = OwnedBitmap::compatible_with(hdc, width, height)?;
        let select = SelectGuard::new(dc.hdc(), HGDIOBJ(bitmap.handle().0));
        Ok(Self { select, dc, bitmap })
    }

    pub fn hdc(&self) -> HDC {
        self.dc.hdc()
    }

    pub fn width(&self) -> i32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> i32 {
        self.bitmap.height()
    }

    /// Release the DC and keep only the bitmap.
    pub fn into_bitmap(self) -> OwnedBitmap {
        let BitmapDc { select, dc, bitmap } = self;
        drop(select);
        drop(dc);
        bitmap
    }
}

/// Grab the primary screen, save it as a new BMP in `dir`, and return it.
pub fn capture_screen(dir: &Path) -> CaptureResult<Screenshot> {
    let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    let screen = ScreenDc::get()?;

    let buffer = BitmapDc::compatible_with(screen.hdc(), width, height)?;
    unsafe {
        BitBlt(buffer.hdc(), 0, 0, width, height, screen.hdc(), 0, 0, SRCCOPY)?;
    }
    let bitmap = buffer.into_bitmap();
    let pixels = bitmap.bgra_pixels(screen.hdc())?;

    let path = unique_shot_path(dir, Local::now().naive_local())?;
    let shot = Screenshot::from_bgra(width as u32, height as u32, pixels, path)?;
    shot.save_bmp()?;

    debug!(width, height, path = %shot.path().display(), "captured screen");
    Ok(shot)
}
