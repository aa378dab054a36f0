//! GDI drawing surface for the list view

use capture::gdi::BitmapDc;
use capture::Screenshot;
use listview::{render, Canvas, Rect, Region, ShotList, Size, SysColor};
use std::mem::size_of;
use tracing::warn;
use windows::Win32::Foundation::{HWND, RECT, SIZE};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, BitBlt, EndPaint, FillRect, GetSysColorBrush, GetTextExtentPoint32W, SetStretchBltMode,
    StretchDIBits, TextOutW, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, COLOR_GRAYTEXT, COLOR_HIGHLIGHT,
    COLOR_WINDOW, DIB_RGB_COLORS, HALFTONE, HDC, PAINTSTRUCT, SRCCOPY, SYS_COLOR_INDEX,
};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

/// BeginPaint/EndPaint pair.
pub struct PaintGuard {
    hwnd: HWND,
    ps: PAINTSTRUCT,
    hdc: HDC,
}

impl PaintGuard {
    pub fn begin(hwnd: HWND) -> Self {
        let mut ps = PAINTSTRUCT::default();
        let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
        Self { hwnd, ps, hdc }
    }

    pub fn hdc(&self) -> HDC {
        self.hdc
    }
}

impl Drop for PaintGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = EndPaint(self.hwnd, &self.ps);
        }
    }
}

fn sys_color_index(color: SysColor) -> SYS_COLOR_INDEX {
    match color {
        SysColor::Window => COLOR_WINDOW,
        SysColor::GrayText => COLOR_GRAYTEXT,
        SysColor::Highlight => COLOR_HIGHLIGHT,
    }
}

fn to_win_rect(rect: Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

/// Canvas drawing onto a device context.
pub struct GdiCanvas {
    hdc: HDC,
}

impl GdiCanvas {
    pub fn new(hdc: HDC) -> Self {
        Self { hdc }
    }
}

impl Canvas for GdiCanvas {
    type Picture = Screenshot;

    fn fill_background(&self, rect: Rect) {
        self.fill_sys_color(rect, SysColor::Window);
    }

    fn fill_sys_color(&self, rect: Rect, color: SysColor) {
        if rect.is_empty() {
            return;
        }
        unsafe {
            FillRect(self.hdc, &to_win_rect(rect), GetSysColorBrush(sys_color_index(color)));
        }
    }

    fn text_out(&self, x: i32, y: i32, text: &str) -> Size {
        let wide: Vec<u16> = text.encode_utf16().collect();
        let mut size = SIZE::default();
        unsafe {
            let _ = TextOutW(self.hdc, x, y, &wide);
            let _ = GetTextExtentPoint32W(self.hdc, &wide, &mut size);
        }
        Size {
            cx: size.cx,
            cy: size.cy,
        }
    }

    fn stretch_picture(&self, picture: &Screenshot, dest: Rect) {
        if dest.is_empty() || picture.width() == 0 || picture.height() == 0 {
            return;
        }

        let (width, height) = (picture.width() as i32, picture.height() as i32);
        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            bmiColors: [Default::default()],
        };

        unsafe {
            SetStretchBltMode(self.hdc, HALFTONE);
            StretchDIBits(
                self.hdc,
                dest.x,
                dest.y,
                dest.w,
                dest.h,
                0,
                0,
                width,
                height,
                Some(picture.pixels().as_ptr() as *const _),
                &bmi,
                DIB_RGB_COLORS,
                SRCCOPY,
            );
        }
    }
}

/// Paint the main window, optionally through an off-screen buffer.
pub fn paint_window(hwnd: HWND, list: &ShotList<Screenshot>, double_buffer: bool) {
    let paint = PaintGuard::begin(hwnd);

    let mut client = RECT::default();
    if let Err(err) = unsafe { GetClientRect(hwnd, &mut client) } {
        warn!(%err, "GetClientRect failed");
        return;
    }
    let (width, height) = (client.right, client.bottom);

    if double_buffer {
        match BitmapDc::compatible_with(paint.hdc(), width, height) {
            Ok(buffer) => {
                let canvas = GdiCanvas::new(buffer.hdc());
                render::draw_main_window(list, Region::new(&canvas, width, height));

                if let Err(err) = unsafe { BitBlt(paint.hdc(), 0, 0, width, height, buffer.hdc(), 0, 0, SRCCOPY) } {
                    warn!(%err, "copying paint buffer failed");
                }
                return;
            }
            Err(err) => warn!(%err, "no paint buffer, drawing directly"),
        }
    }

    let canvas = GdiCanvas::new(paint.hdc());
    render::draw_main_window(list, Region::new(&canvas, width, height));
}
