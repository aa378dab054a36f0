//! Composable drawing regions
//!
//! A [`Region`] is a rectangle bound to a borrowed [`Canvas`]. Drawing code
//! takes a region by value, carves it up, and paints only inside the parts it
//! was handed, so one window can host several independent drawing routines
//! without a child window per area.

use crate::picture::{height_for_width, letterbox, Picture};
use crate::{Rect, Size, SysColor};
use std::fmt;

/// Drawing surface the regions paint on.
///
/// Implementations must treat empty or negative rectangles as no-ops.
pub trait Canvas {
    /// Image type this canvas knows how to stretch onto itself.
    type Picture: Picture;

    /// Fill with the window background color.
    fn fill_background(&self, rect: Rect);

    /// Fill with one of the system colors.
    fn fill_sys_color(&self, rect: Rect, color: SysColor);

    /// Draw `text` with its top-left corner at (x, y) and return its size.
    fn text_out(&self, x: i32, y: i32, text: &str) -> Size;

    /// Stretch the whole picture into `dest`, ignoring aspect ratio.
    fn stretch_picture(&self, picture: &Self::Picture, dest: Rect);
}

/// Rectangle of interest on a canvas that is not owned.
///
/// The fields are a cursor that callers adjust freely; they are not a clip
/// region.
pub struct Region<'a, C: ?Sized> {
    canvas: &'a C,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl<C: ?Sized> Clone for Region<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for Region<'_, C> {}

impl<C: ?Sized> fmt::Debug for Region<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("w", &self.w)
            .field("h", &self.h)
            .finish()
    }
}

impl<'a, C: Canvas + ?Sized> Region<'a, C> {
    /// Region covering `width` x `height` at the canvas origin.
    pub fn new(canvas: &'a C, width: i32, height: i32) -> Self {
        Self::with_rect(canvas, Rect::new(0, 0, width, height))
    }

    pub fn with_rect(canvas: &'a C, rect: Rect) -> Self {
        Self {
            canvas,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        }
    }

    pub fn canvas(&self) -> &'a C {
        self.canvas
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Inset every edge by `margin`. A negative margin grows the region.
    pub fn shrink_by_margin(&mut self, margin: i32) {
        self.x += margin;
        self.y += margin;
        self.w -= margin * 2;
        self.h -= margin * 2;
    }

    /// Move the top edge down by `dy`, keeping the bottom edge in place.
    pub fn move_top_by(&mut self, dy: i32) {
        self.y += dy;
        self.h -= dy;
    }

    /// Split into vertical strips, with `widths` taken from the right.
    ///
    /// The first strip is whatever is left over on the left, followed by one
    /// strip per entry of `widths` in order. The leftover strip goes negative
    /// when the widths add up to more than the region.
    pub fn split_horizontally_from_right(&self, widths: &[i32]) -> Vec<Self> {
        let used: i32 = widths.iter().sum();

        let mut strips = Vec::with_capacity(widths.len() + 1);
        let leftover = Self {
            w: self.w - used,
            ..*self
        };
        strips.push(leftover);

        let mut x = self.x + leftover.w;
        for &w in widths {
            strips.push(Self { x, w, ..*self });
            x += w;
        }

        strips
    }

    pub fn fill_background(&self) {
        self.canvas.fill_background(self.rect());
    }

    pub fn fill_sys_color(&self, color: SysColor) {
        self.canvas.fill_sys_color(self.rect(), color);
    }

    /// Draw `text` at the top-left corner and return its size.
    pub fn text_out(&self, text: &str) -> Size {
        self.canvas.text_out(self.x, self.y, text)
    }

    /// Draw `text`, then move the top edge below it.
    pub fn text_out_move_top(&mut self, text: &str) {
        let size = self.text_out(text);
        self.move_top_by(size.cy);
    }

    /// Draw `picture` to fill the region, letterboxed to keep its aspect
    /// ratio.
    pub fn draw_picture(&self, picture: &C::Picture) {
        let (src_w, src_h) = picture.pixel_size();
        let Some(layout) = letterbox(src_w, src_h, self.rect()) else {
            return;
        };

        for bar in layout.bars.iter().flatten() {
            self.canvas.fill_background(*bar);
        }
        if let Some(image) = layout.image {
            self.canvas.stretch_picture(picture, image);
        }
    }

    /// Draw `picture` across the full width at the height that keeps its
    /// aspect ratio, and return that height.
    pub fn draw_picture_auto_height(&self, picture: &C::Picture) -> i32 {
        let (src_w, src_h) = picture.pixel_size();
        let h = height_for_width(src_w, src_h, self.w);

        let target = Self { h, ..*self };
        target.draw_picture(picture);
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeShot, Op, RecordingCanvas};

    #[test]
    fn split_two_widths_from_right() {
        let canvas = RecordingCanvas::default();
        let region = Region::new(&canvas, 1000, 600);

        let strips = region.split_horizontally_from_right(&[3, 400]);
        let rects: Vec<Rect> = strips.iter().map(|r| r.rect()).collect();

        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 597, 600),
                Rect::new(597, 0, 3, 600),
                Rect::new(600, 0, 400, 600),
            ]
        );
    }

    #[test]
    fn split_keeps_offset_and_allows_negative_leftover() {
        let canvas = RecordingCanvas::default();
        let region = Region::with_rect(&canvas, Rect::new(10, 20, 100, 50));

        let strips = region.split_horizontally_from_right(&[30, 90]);

        assert_eq!(strips[0].rect(), Rect::new(10, 20, -20, 50));
        assert_eq!(strips[1].rect(), Rect::new(-10, 20, 30, 50));
        assert_eq!(strips[2].rect(), Rect::new(20, 20, 90, 50));
        assert_eq!(strips[2].x + strips[2].w, 110);
    }

    #[test]
    fn split_with_no_widths_returns_copy() {
        let canvas = RecordingCanvas::default();
        let region = Region::new(&canvas, 80, 40);

        let strips = region.split_horizontally_from_right(&[]);
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].rect(), region.rect());
    }

    #[test]
    fn shrink_and_expand() {
        let canvas = RecordingCanvas::default();
        let mut region = Region::new(&canvas, 100, 60);

        region.shrink_by_margin(5);
        assert_eq!(region.rect(), Rect::new(5, 5, 90, 50));

        region.shrink_by_margin(-9);
        assert_eq!(region.rect(), Rect::new(-4, -4, 108, 68));
    }

    #[test]
    fn move_top_keeps_bottom() {
        let canvas = RecordingCanvas::default();
        let mut region = Region::new(&canvas, 100, 60);

        region.move_top_by(25);
        assert_eq!(region.rect(), Rect::new(0, 25, 100, 35));
        assert_eq!(region.rect().bottom(), 60);
    }

    #[test]
    fn copies_are_independent() {
        let canvas = RecordingCanvas::default();
        let region = Region::new(&canvas, 100, 60);

        let mut copy = region;
        copy.move_top_by(10);

        assert_eq!(region.y, 0);
        assert_eq!(copy.y, 10);
    }

    #[test]
    fn text_out_move_top_advances_by_text_height() {
        let canvas = RecordingCanvas::default();
        let mut region = Region::new(&canvas, 300, 200);

        region.text_out_move_top("hello");

        assert_eq!(region.y, RecordingCanvas::TEXT_HEIGHT);
        assert_eq!(region.h, 200 - RecordingCanvas::TEXT_HEIGHT);
        assert_eq!(canvas.ops(), vec![Op::Text(0, 0, "hello".into())]);
    }

    #[test]
    fn auto_height_follows_aspect_ratio() {
        let canvas = RecordingCanvas::default();
        let region = Region::with_rect(&canvas, Rect::new(5, 7, 200, 1000));
        let shot = FakeShot::new(400, 300);

        let h = region.draw_picture_auto_height(&shot);

        assert_eq!(h, 150);
        assert_eq!(canvas.ops(), vec![Op::Picture(Rect::new(5, 7, 200, 150))]);
    }

    #[test]
    fn draw_picture_letterboxes_narrow_source() {
        let canvas = RecordingCanvas::default();
        let region = Region::new(&canvas, 300, 100);
        let shot = FakeShot::new(100, 100);

        region.draw_picture(&shot);

        assert_eq!(
            canvas.ops(),
            vec![
                Op::Background(Rect::new(0, 0, 100, 100)),
                Op::Background(Rect::new(200, 0, 100, 100)),
                Op::Picture(Rect::new(100, 0, 100, 100)),
            ]
        );
    }

    #[test]
    fn draw_into_empty_region_does_nothing() {
        let canvas = RecordingCanvas::default();
        let region = Region::with_rect(&canvas, Rect::new(0, 0, -5, 100));

        region.draw_picture(&FakeShot::new(100, 100));
        assert!(canvas.ops().is_empty());
    }
}
