//! Screenshot list: layout, selection and scrolling
//!
//! [`ShotList`] owns the screenshots together with the selection and scroll
//! position, and keeps the three consistent whenever any of them changes.
//! Everything it needs from the window (viewport height, the scrollbar,
//! redraws) goes through [`ListHost`].

use crate::event::{Handled, ListCommand, ListEvent, ScrollRequest};
use crate::picture::{height_for_width, Picture};
use crate::ListStyle;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Scrollbar state pushed to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollInfo {
    pub min: i32,
    pub max: i32,
    pub page: i32,
    pub pos: i32,
}

/// The window side of the list.
pub trait ListHost {
    /// Item type produced by [`ListHost::capture_shot`].
    type Shot;

    /// Current height of the visible list area. Asked for every time it is
    /// needed.
    fn viewport_height(&self) -> i32;

    /// Update the vertical scrollbar.
    fn set_scroll_info(&mut self, info: ScrollInfo);

    /// Ask for the whole window to be repainted.
    fn request_redraw(&mut self);

    /// Take a new screenshot. Failure is fatal, so there is no error path.
    fn capture_shot(&mut self) -> Self::Shot;

    /// Ask the application to close.
    fn request_quit(&mut self);
}

/// Saved state to merge into a list. `None` fields keep the current value.
pub struct RestoredState<P> {
    pub shots: Option<Vec<P>>,
    pub list_width: Option<i32>,
    pub selected_index: Option<i32>,
    pub list_scroll: Option<i32>,
}

impl<P> Default for RestoredState<P> {
    fn default() -> Self {
        Self {
            shots: None,
            list_width: None,
            selected_index: None,
            list_scroll: None,
        }
    }
}

/// Screenshots, most recent first, with selection and scroll state.
pub struct ShotList<P> {
    shots: VecDeque<P>,
    list_width: i32,
    selected: Option<usize>,
    list_scroll: i32,
    style: ListStyle,
}

impl<P: Picture> ShotList<P> {
    pub fn new(style: ListStyle) -> Self {
        Self {
            shots: VecDeque::new(),
            list_width: style.default_list_width,
            selected: None,
            list_scroll: 0,
            style,
        }
    }

    pub fn style(&self) -> &ListStyle {
        &self.style
    }

    pub fn shots(&self) -> impl Iterator<Item = &P> {
        self.shots.iter()
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Width of the list column in pixels.
    pub fn list_width(&self) -> i32 {
        self.list_width
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_shot(&self) -> Option<&P> {
        self.selected.and_then(|i| self.shots.get(i))
    }

    /// Pixels scrolled past the top of the list.
    pub fn list_scroll(&self) -> i32 {
        self.list_scroll
    }

    /// Selection as a signed index, -1 for none.
    fn selected_signed(&self) -> isize {
        self.selected.map_or(-1, |i| i as isize)
    }

    /// Height of `shot` when drawn in the list column.
    pub fn item_height(&self, shot: &P, column_width: i32) -> i32 {
        let (w, h) = shot.pixel_size();
        height_for_width(w, h, column_width)
    }

    // ----------------------------- Layout -----------------------------

    /// Vertical placement of item `chosen` in an unscrolled list of
    /// unlimited height, as (top, height).
    ///
    /// The height includes the margins above and below the item even though
    /// those are shared with its neighbours; that is the highlight extent.
    /// An index that names no item yields the bounds of an empty item past
    /// the end, whose top is the content height.
    pub fn item_vertical_bounds(&self, chosen: Option<usize>) -> (i32, i32) {
        let margin = self.style.list_margin;
        let column_width = self.list_width - margin * 2;

        let mut y = 0;
        for (index, shot) in self.shots.iter().enumerate() {
            let shot_height = self.item_height(shot, column_width);

            if chosen == Some(index) {
                return (y, shot_height + margin * 2);
            }

            y += margin + shot_height;
        }

        (y + margin, 0)
    }

    /// Height the list would occupy in an infinitely tall window.
    pub fn list_content_height(&self) -> i32 {
        self.item_vertical_bounds(None).0
    }

    // ---------------------------- Selection ----------------------------

    /// Select `new_index`, clamped to the list. Returns true if the
    /// selection changed, in which case the view is scrolled to it and
    /// redrawn.
    pub fn select_item<H>(&mut self, host: &mut H, new_index: isize) -> bool
    where
        H: ListHost<Shot = P>,
    {
        let bounded = if self.shots.is_empty() {
            None
        } else {
            let last = self.shots.len() as isize - 1;
            Some(new_index.clamp(0, last) as usize)
        };

        if bounded == self.selected {
            return false;
        }

        self.selected = bounded;
        self.scroll_to_selected_index(host);
        self.set_vscroll_info(host);
        host.request_redraw();
        true
    }

    /// Re-clamp the selection after the list changed.
    pub fn bound_selected_index<H>(&mut self, host: &mut H)
    where
        H: ListHost<Shot = P>,
    {
        self.select_item(host, self.selected_signed());
    }

    // ---------------------------- Scrolling ----------------------------

    /// Scroll so the selected item is visible. When it is taller than the
    /// viewport its top edge is shown.
    pub fn scroll_to_selected_index<H>(&mut self, host: &H)
    where
        H: ListHost<Shot = P>,
    {
        let Some(selected) = self.selected else {
            return;
        };

        let (y, h) = self.item_vertical_bounds(Some(selected));
        let window_height = host.viewport_height();

        if y + h > self.list_scroll + window_height {
            self.list_scroll = y + h - window_height;
            debug!(y, h, window_height, list_scroll = self.list_scroll, "scroll down to selection");
        }

        if y < self.list_scroll {
            self.list_scroll = y;
            debug!(y, h, window_height, list_scroll = self.list_scroll, "scroll up to selection");
        }
    }

    /// Clamp the scroll position and push it to the scrollbar.
    pub fn set_vscroll_info<H>(&mut self, host: &mut H)
    where
        H: ListHost<Shot = P>,
    {
        let window_height = host.viewport_height();
        let content_height = self.list_content_height();

        let max_scroll = (content_height - window_height).max(0);
        self.list_scroll = self.list_scroll.clamp(0, max_scroll);

        // The native control only draws its thumb right with the page
        // added to the range.
        let info = ScrollInfo {
            min: 0,
            max: max_scroll + window_height,
            page: window_height,
            pos: self.list_scroll,
        };
        host.set_scroll_info(info);

        trace!(content_height, max_scroll, page = window_height, pos = self.list_scroll, "set vscroll info");
    }

    /// Respond to the scrollbar. `new_pos` only matters for thumb requests.
    /// Returns false for requests that are ignored.
    pub fn on_vscroll<H>(&mut self, host: &mut H, request: ScrollRequest, new_pos: i32) -> bool
    where
        H: ListHost<Shot = P>,
    {
        let window_height = host.viewport_height();
        let line = self.style.line_amount;

        match request {
            ScrollRequest::PageUp => self.list_scroll -= window_height,
            ScrollRequest::PageDown => self.list_scroll += window_height,
            ScrollRequest::LineUp => self.list_scroll -= line,
            ScrollRequest::LineDown => self.list_scroll += line,
            ScrollRequest::ThumbPosition | ScrollRequest::ThumbTrack => self.list_scroll = new_pos,
            ScrollRequest::Other => return false,
        }

        self.set_vscroll_info(host);
        host.request_redraw();
        true
    }

    /// The viewport changed size.
    pub fn on_resize<H>(&mut self, host: &mut H)
    where
        H: ListHost<Shot = P>,
    {
        self.set_vscroll_info(host);
        host.request_redraw();
    }

    // ---------------------------- Mutation -----------------------------

    /// Put a fresh screenshot at the top and select it.
    pub fn push_shot<H>(&mut self, host: &mut H, shot: P)
    where
        H: ListHost<Shot = P>,
    {
        self.shots.push_front(shot);
        self.select_item(host, 0);
        self.set_vscroll_info(host);
        host.request_redraw();
    }

    /// Remove the selected screenshot and hand it back.
    pub fn delete_selected<H>(&mut self, host: &mut H) -> Option<P>
    where
        H: ListHost<Shot = P>,
    {
        let index = self.selected?;
        let removed = self.shots.remove(index)?;

        self.bound_selected_index(host);
        self.set_vscroll_info(host);
        host.request_redraw();
        Some(removed)
    }

    /// Change the width of the list column.
    pub fn set_list_width<H>(&mut self, host: &mut H, width: i32)
    where
        H: ListHost<Shot = P>,
    {
        self.list_width = width.max(0);
        self.scroll_to_selected_index(host);
        self.set_vscroll_info(host);
        host.request_redraw();
    }

    /// Merge saved state into the list, keeping current values for absent
    /// fields, then re-validate selection and scroll.
    pub fn restore<H>(&mut self, host: &mut H, state: RestoredState<P>)
    where
        H: ListHost<Shot = P>,
    {
        if let Some(shots) = state.shots {
            self.shots = shots.into();
        }
        if let Some(width) = state.list_width {
            self.list_width = width.max(0);
        }
        if let Some(index) = state.selected_index {
            self.selected = usize::try_from(index).ok();
        }
        if let Some(scroll) = state.list_scroll {
            self.list_scroll = scroll;
        }

        self.bound_selected_index(host);
        self.set_vscroll_info(host);
        host.request_redraw();
    }

    // ----------------------------- Events ------------------------------

    /// Single entry point for everything the window forwards to the list.
    pub fn handle_event<H>(&mut self, host: &mut H, event: ListEvent) -> Handled
    where
        H: ListHost<Shot = P>,
    {
        match event {
            ListEvent::Command(command) => {
                debug!(?command, "list command");
                match command {
                    ListCommand::Capture => {
                        let shot = host.capture_shot();
                        self.push_shot(host, shot);
                    }
                    ListCommand::SelectPrevious => {
                        self.select_item(host, self.selected_signed() - 1);
                    }
                    ListCommand::SelectNext => {
                        self.select_item(host, self.selected_signed() + 1);
                    }
                    ListCommand::DeleteSelected => {
                        self.delete_selected(host);
                    }
                    ListCommand::Quit => host.request_quit(),
                }
                Handled::Yes
            }
            ListEvent::Scroll { request, pos } => {
                if self.on_vscroll(host, request, pos) {
                    Handled::Yes
                } else {
                    Handled::No
                }
            }
            ListEvent::Resize => {
                self.on_resize(host);
                Handled::Yes
            }
            ListEvent::Select(index) => {
                self.select_item(host, index);
                Handled::Yes
            }
        }
    }
}
