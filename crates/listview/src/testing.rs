//! Test doubles shared by the unit tests in this crate.

use crate::list::{ListHost, ScrollInfo};
use crate::picture::Picture;
use crate::region::Canvas;
use crate::{Rect, Size, SysColor};
use std::cell::RefCell;

/// Picture with a size and a name, no pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeShot {
    pub width: i32,
    pub height: i32,
    pub name: String,
}

impl FakeShot {
    pub fn new(width: i32, height: i32) -> Self {
        Self::named(width, height, "shot")
    }

    pub fn named(width: i32, height: i32, name: &str) -> Self {
        Self {
            width,
            height,
            name: name.to_string(),
        }
    }
}

impl Picture for FakeShot {
    fn pixel_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn caption(&self) -> String {
        self.name.clone()
    }
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Background(Rect),
    Color(Rect, SysColor),
    Text(i32, i32, String),
    Picture(Rect),
}

/// Canvas that records what was drawn instead of drawing it.
#[derive(Default)]
pub struct RecordingCanvas {
    ops: RefCell<Vec<Op>>,
}

impl RecordingCanvas {
    pub const TEXT_HEIGHT: i32 = 16;
    pub const CHAR_WIDTH: i32 = 8;

    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    pub fn pictures(&self) -> Vec<Rect> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Picture(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, _, text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: Op) {
        self.ops.borrow_mut().push(op);
    }
}

impl Canvas for RecordingCanvas {
    type Picture = FakeShot;

    fn fill_background(&self, rect: Rect) {
        self.record(Op::Background(rect));
    }

    fn fill_sys_color(&self, rect: Rect, color: SysColor) {
        self.record(Op::Color(rect, color));
    }

    fn text_out(&self, x: i32, y: i32, text: &str) -> Size {
        self.record(Op::Text(x, y, text.to_string()));
        Size {
            cx: Self::CHAR_WIDTH * text.chars().count() as i32,
            cy: Self::TEXT_HEIGHT,
        }
    }

    fn stretch_picture(&self, _picture: &FakeShot, dest: Rect) {
        self.record(Op::Picture(dest));
    }
}

/// Host with a fixed viewport that records what the list asks of it.
pub struct FakeHost {
    pub viewport_height: i32,
    pub scroll_infos: Vec<ScrollInfo>,
    pub redraws: usize,
    pub quit_requested: bool,
    pub captures: Vec<FakeShot>,
}

impl FakeHost {
    pub fn new(viewport_height: i32) -> Self {
        Self {
            viewport_height,
            scroll_infos: Vec::new(),
            redraws: 0,
            quit_requested: false,
            captures: Vec::new(),
        }
    }

    pub fn last_scroll_info(&self) -> Option<ScrollInfo> {
        self.scroll_infos.last().copied()
    }
}

impl ListHost for FakeHost {
    type Shot = FakeShot;

    fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    fn set_scroll_info(&mut self, info: ScrollInfo) {
        self.scroll_infos.push(info);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn capture_shot(&mut self) -> FakeShot {
        if self.captures.is_empty() {
            FakeShot::new(100, 80)
        } else {
            self.captures.remove(0)
        }
    }

    fn request_quit(&mut self) {
        self.quit_requested = true;
    }
}
