//! List view core for Screenshot List
//!
//! Region-based drawing, list layout, and the selection/scroll state machine.
//! Nothing in here talks to the platform directly; the window shell plugs in
//! through [`Canvas`] and [`ListHost`].

pub mod event;
pub mod list;
pub mod picture;
pub mod region;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

pub use event::{Handled, ListCommand, ListEvent, ScrollRequest};
pub use list::{ListHost, RestoredState, ScrollInfo, ShotList};
pub use picture::{height_for_width, letterbox, Letterbox, Picture};
pub use region::{Canvas, Region};

/// Rectangle in client pixels.
///
/// Width and height are signed on purpose: splitting and shrinking may drive
/// them to zero or below, and drawing into such a rectangle is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True if nothing can be drawn inside.
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Size of drawn text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub cx: i32,
    pub cy: i32,
}

/// System colors the list view paints with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysColor {
    /// Window background
    Window,
    /// Divider between preview and list
    GrayText,
    /// Selection frame
    Highlight,
}

/// Layout constants, threaded in at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyle {
    /// Width of the divider between the preview and the list.
    pub divider_width: i32,
    /// Margin around the list contents and between list items.
    pub list_margin: i32,
    /// Thickness of the frame drawn around the selected item.
    pub highlight_thickness: i32,
    /// Margin around the large preview.
    pub large_shot_margin: i32,
    /// Pixels scrolled by the scrollbar arrows.
    pub line_amount: i32,
    /// Initial width of the list column.
    pub default_list_width: i32,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            divider_width: 3,
            list_margin: 5,
            highlight_thickness: 4,
            large_shot_margin: 5,
            line_amount: 20,
            default_list_width: 400,
        }
    }
}
