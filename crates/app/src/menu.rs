//! Menu bar

use crate::commands::MenuCommand;
use std::path::Path;
use windows::core::{w, HSTRING, PCWSTR};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CheckMenuItem, CreateMenu, HMENU, MF_BYCOMMAND, MF_CHECKED, MF_POPUP, MF_SEPARATOR,
    MF_STRING, MF_UNCHECKED,
};

unsafe fn append_item(menu: HMENU, command: MenuCommand, label: impl windows::core::Param<PCWSTR>) -> windows::core::Result<()> {
    AppendMenuW(menu, MF_STRING, command.id() as usize, label)
}

unsafe fn append_popup(bar: HMENU, popup: HMENU, label: PCWSTR) -> windows::core::Result<()> {
    AppendMenuW(bar, MF_POPUP, popup.0 as usize, label)
}

/// File, Options and Help menus. Item text names `list_file`.
pub fn create_menu_bar(list_file: &Path) -> windows::core::Result<HMENU> {
    let list_file = list_file.display();

    unsafe {
        let bar = CreateMenu()?;

        let file = CreateMenu()?;
        append_item(file, MenuCommand::Save, &HSTRING::from(format!("&Save to {list_file}")))?;
        append_item(file, MenuCommand::Load, &HSTRING::from(format!("&Load from {list_file}")))?;
        AppendMenuW(file, MF_SEPARATOR, 0, PCWSTR::null())?;
        append_item(file, MenuCommand::Quit, w!("&Quit"))?;
        append_popup(bar, file, w!("&File"))?;

        let options = CreateMenu()?;
        append_item(options, MenuCommand::ToggleHotkeys, w!("Register &hotkeys"))?;
        AppendMenuW(options, MF_SEPARATOR, 0, PCWSTR::null())?;
        append_item(options, MenuCommand::WiderList, w!("&Wider list"))?;
        append_item(options, MenuCommand::NarrowerList, w!("&Narrower list"))?;
        append_popup(bar, options, w!("&Options"))?;

        let help = CreateMenu()?;
        append_item(help, MenuCommand::About, w!("&About..."))?;
        append_popup(bar, help, w!("&Help"))?;

        Ok(bar)
    }
}

/// Tick or untick the hotkey menu item.
pub fn set_hotkeys_checked(bar: HMENU, checked: bool) {
    let state = if checked { MF_CHECKED } else { MF_UNCHECKED };
    unsafe {
        CheckMenuItem(bar, MenuCommand::ToggleHotkeys.id() as u32, (MF_BYCOMMAND | state).0);
    }
}
