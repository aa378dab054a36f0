//! Input events understood by the list

/// Discrete commands coming from keys, hotkeys, or the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    /// Take a new screenshot and put it at the top.
    Capture,
    /// Move the selection up one item.
    SelectPrevious,
    /// Move the selection down one item.
    SelectNext,
    /// Discard the selected screenshot.
    DeleteSelected,
    /// Close the application.
    Quit,
}

/// Scrollbar requests, mirroring the native scrollbar notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    ThumbPosition,
    ThumbTrack,
    /// Anything else (end-scroll, top, bottom). Ignored.
    Other,
}

/// Everything that can happen to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    Command(ListCommand),
    Scroll { request: ScrollRequest, pos: i32 },
    Resize,
    Select(isize),
}

/// Whether an event was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn is_handled(self) -> bool {
        matches!(self, Handled::Yes)
    }
}
