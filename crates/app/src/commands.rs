//! Mapping of keys, menu items and scrollbar codes to list input

use listview::{ListCommand, ScrollRequest};

pub const VK_F5: u32 = 0x74;
pub const VK_UP: u32 = 0x26;
pub const VK_DOWN: u32 = 0x28;
pub const VK_DELETE: u32 = 0x2E;
pub const VK_Q: u32 = 0x51;

/// Keys registered as global hotkeys. Each is registered with its own
/// key code as the hotkey id.
pub const HOTKEY_KEYS: [u32; 4] = [VK_F5, VK_UP, VK_DOWN, VK_DELETE];

/// Pixels the list column grows or shrinks per menu click.
pub const LIST_WIDTH_STEP: i32 = 50;

/// List command for a key press or hotkey, if it means anything.
pub fn key_command(vk: u32) -> Option<ListCommand> {
    match vk {
        VK_F5 => Some(ListCommand::Capture),
        VK_UP => Some(ListCommand::SelectPrevious),
        VK_DOWN => Some(ListCommand::SelectNext),
        VK_DELETE => Some(ListCommand::DeleteSelected),
        VK_Q => Some(ListCommand::Quit),
        _ => None,
    }
}

/// Scrollbar notification code, the low word of `WM_VSCROLL`'s wParam.
pub fn scroll_request(code: u32) -> ScrollRequest {
    match code {
        0 => ScrollRequest::LineUp,
        1 => ScrollRequest::LineDown,
        2 => ScrollRequest::PageUp,
        3 => ScrollRequest::PageDown,
        4 => ScrollRequest::ThumbPosition,
        5 => ScrollRequest::ThumbTrack,
        _ => ScrollRequest::Other,
    }
}

/// Low and high 16-bit words of a message parameter.
pub fn split_words(value: usize) -> (u32, u32) {
    ((value & 0xFFFF) as u32, ((value >> 16) & 0xFFFF) as u32)
}

/// Menu bar items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Save,
    Load,
    Quit,
    ToggleHotkeys,
    WiderList,
    NarrowerList,
    About,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 7] = [
        MenuCommand::Save,
        MenuCommand::Load,
        MenuCommand::Quit,
        MenuCommand::ToggleHotkeys,
        MenuCommand::WiderList,
        MenuCommand::NarrowerList,
        MenuCommand::About,
    ];

    /// Menu item id, as carried in `WM_COMMAND`.
    pub fn id(self) -> u16 {
        match self {
            MenuCommand::Save => 1,
            MenuCommand::Load => 2,
            MenuCommand::Quit => 3,
            MenuCommand::ToggleHotkeys => 4,
            MenuCommand::WiderList => 5,
            MenuCommand::NarrowerList => 6,
            MenuCommand::About => 7,
        }
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }
}
