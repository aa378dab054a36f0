//! Main window: message handling and the list's window-side services

use crate::commands::{key_command, scroll_request, split_words, MenuCommand, HOTKEY_KEYS, LIST_WIDTH_STEP};
use crate::config::AppConfig;
use crate::gdi_canvas::paint_window;
use crate::menu;
use capture::Screenshot;
use listview::{Handled, ListEvent, ListHost, ListStyle, ScrollInfo, ShotList};
use std::cell::RefCell;
use std::mem::size_of;
use std::path::{Path, PathBuf};
use store::ListRecord;
use tracing::{debug, error, warn};
use windows::core::{w, HSTRING, PCWSTR};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{InvalidateRect, UpdateWindow, HBRUSH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2};
use windows::Win32::UI::Input::KeyboardAndMouse::{RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS};
use windows::Win32::UI::WindowsAndMessaging::*;

/// Process exit code when a screenshot cannot be taken.
pub const CAPTURE_FAILURE_EXIT_CODE: i32 = 2;

const CLASS_NAME: PCWSTR = w!("ScreenshotListMain");

thread_local! {
    static WINDOW: RefCell<Option<WindowState>> = const { RefCell::new(None) };
}

/// Run `f` on the window state. `None` while the window is being created,
/// after it is gone, or when a message arrives re-entrantly while the state
/// is already in use.
fn with_window<R>(f: impl FnOnce(&mut WindowState) -> R) -> Option<R> {
    WINDOW.with(|cell| {
        let mut slot = cell.try_borrow_mut().ok()?;
        let state = slot.as_mut()?;
        Some(f(state))
    })
}

fn client_height(hwnd: HWND) -> i32 {
    let mut rect = RECT::default();
    match unsafe { GetClientRect(hwnd, &mut rect) } {
        Ok(()) => rect.bottom - rect.top,
        Err(err) => {
            warn!(%err, "GetClientRect failed");
            0
        }
    }
}

fn show_message(hwnd: HWND, title: &str, text: &str, style: MESSAGEBOX_STYLE) {
    unsafe {
        MessageBoxW(hwnd, &HSTRING::from(text), &HSTRING::from(title), MB_OK | style);
    }
}

/// Message box to show once the window state is released.
struct Notice {
    title: String,
    text: String,
    style: MESSAGEBOX_STYLE,
}

/// What the list sees of the window.
struct WindowHost<'a> {
    hwnd: HWND,
    shots_dir: &'a Path,
}

impl ListHost for WindowHost<'_> {
    type Shot = Screenshot;

    fn viewport_height(&self) -> i32 {
        client_height(self.hwnd)
    }

    fn set_scroll_info(&mut self, info: ScrollInfo) {
        let si = SCROLLINFO {
            cbSize: size_of::<SCROLLINFO>() as u32,
            fMask: SIF_DISABLENOSCROLL | SIF_PAGE | SIF_POS | SIF_RANGE,
            nMin: info.min,
            nMax: info.max,
            nPage: info.page.max(0) as u32,
            nPos: info.pos,
            nTrackPos: 0,
        };
        unsafe {
            SetScrollInfo(self.hwnd, SB_VERT, &si, true);
        }
    }

    fn request_redraw(&mut self) {
        unsafe {
            let _ = InvalidateRect(self.hwnd, None, false);
        }
    }

    fn capture_shot(&mut self) -> Screenshot {
        match capture::gdi::capture_screen(self.shots_dir) {
            Ok(shot) => shot,
            Err(err) => {
                error!(%err, "screen capture failed");
                show_message(
                    self.hwnd,
                    "Screenshot List",
                    &format!("Screen capture failed: {err}"),
                    MB_ICONERROR,
                );
                std::process::exit(CAPTURE_FAILURE_EXIT_CODE);
            }
        }
    }

    fn request_quit(&mut self) {
        unsafe {
            let _ = PostMessageW(self.hwnd, WM_CLOSE, WPARAM(0), LPARAM(0));
        }
    }
}

struct WindowState {
    hwnd: HWND,
    menu_bar: HMENU,
    list: ShotList<Screenshot>,
    shots_dir: PathBuf,
    list_file: PathBuf,
    double_buffer: bool,
    hotkeys_registered: bool,
}

impl WindowState {
    fn handle(&mut self, event: ListEvent) -> Handled {
        let mut host = WindowHost {
            hwnd: self.hwnd,
            shots_dir: &self.shots_dir,
        };
        self.list.handle_event(&mut host, event)
    }

    fn set_list_width(&mut self, width: i32) {
        let mut host = WindowHost {
            hwnd: self.hwnd,
            shots_dir: &self.shots_dir,
        };
        self.list.set_list_width(&mut host, width);
    }

    fn set_hotkeys_registered(&mut self, registered: bool) {
        if registered == self.hotkeys_registered {
            return;
        }

        for vk in HOTKEY_KEYS {
            let result = unsafe {
                if registered {
                    RegisterHotKey(self.hwnd, vk as i32, HOT_KEY_MODIFIERS(0), vk)
                } else {
                    UnregisterHotKey(self.hwnd, vk as i32)
                }
            };
            if let Err(err) = result {
                warn!(vk, registered, %err, "hotkey change failed");
            }
        }

        self.hotkeys_registered = registered;
        menu::set_hotkeys_checked(self.menu_bar, registered);
        debug!(registered, "hotkeys");
    }

    fn save(&self) -> Option<Notice> {
        let record = ListRecord::from_list(&self.list, self.hotkeys_registered);
        match store::save(&self.list_file, &record) {
            Ok(()) => None,
            Err(err) => {
                warn!(%err, path = %self.list_file.display(), "saving list failed");
                Some(Notice {
                    title: format!("Error saving {}", self.list_file.display()),
                    text: err.to_string(),
                    style: MB_ICONWARNING,
                })
            }
        }
    }

    fn load(&mut self) -> Option<Notice> {
        let record = match store::load(&self.list_file) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, path = %self.list_file.display(), "loading list failed");
                return Some(Notice {
                    title: format!("Error loading {}", self.list_file.display()),
                    text: err.to_string(),
                    style: MB_ICONWARNING,
                });
            }
        };

        let restored = record.into_restored();
        {
            let mut host = WindowHost {
                hwnd: self.hwnd,
                shots_dir: &self.shots_dir,
            };
            self.list.restore(&mut host, restored.state);
        }
        if let Some(registered) = restored.hotkeys_registered {
            self.set_hotkeys_registered(registered);
        }
        None
    }

    fn menu_command(&mut self, command: MenuCommand) -> Option<Notice> {
        debug!(?command, "menu command");
        match command {
            MenuCommand::Save => return self.save(),
            MenuCommand::Load => return self.load(),
            MenuCommand::Quit => {
                self.handle(ListEvent::Command(listview::ListCommand::Quit));
            }
            MenuCommand::ToggleHotkeys => self.set_hotkeys_registered(!self.hotkeys_registered),
            MenuCommand::WiderList => self.set_list_width(self.list.list_width() + LIST_WIDTH_STEP),
            MenuCommand::NarrowerList => self.set_list_width(self.list.list_width() - LIST_WIDTH_STEP),
            MenuCommand::About => {
                return Some(Notice {
                    title: "About Screenshot List".to_string(),
                    text: format!(
                        "Screenshot List v{}\nLicensed under the MIT open source license",
                        env!("CARGO_PKG_VERSION")
                    ),
                    style: MB_ICONINFORMATION,
                });
            }
        }
        None
    }
}

fn list_event(event: ListEvent) -> Option<LRESULT> {
    match with_window(|state| state.handle(event))? {
        Handled::Yes => Some(LRESULT(0)),
        Handled::No => None,
    }
}

fn key_event(vk: u32) -> Option<LRESULT> {
    list_event(ListEvent::Command(key_command(vk)?))
}

fn on_menu_command(hwnd: HWND, id: u16) -> Option<LRESULT> {
    let command = MenuCommand::from_id(id)?;
    // Message boxes pump messages, so they wait until the state is free.
    if let Some(notice) = with_window(|state| state.menu_command(command))? {
        show_message(hwnd, &notice.title, &notice.text, notice.style);
    }
    Some(LRESULT(0))
}

unsafe extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let result = match msg {
        WM_PAINT => with_window(|state| {
            paint_window(hwnd, &state.list, state.double_buffer);
            LRESULT(0)
        }),

        // Painting covers the whole client area.
        WM_ERASEBKGND => Some(LRESULT(1)),

        WM_SIZE => list_event(ListEvent::Resize),

        WM_VSCROLL => {
            let (code, pos) = split_words(wparam.0);
            list_event(ListEvent::Scroll {
                request: scroll_request(code),
                pos: pos as i32,
            })
        }

        WM_KEYDOWN => key_event(wparam.0 as u32),

        WM_HOTKEY => {
            debug!(id = wparam.0, "hotkey");
            key_event(wparam.0 as u32)
        }

        WM_COMMAND => on_menu_command(hwnd, split_words(wparam.0).0 as u16),

        WM_DESTROY => {
            with_window(|state| state.set_hotkeys_registered(false));
            PostQuitMessage(0);
            Some(LRESULT(0))
        }

        _ => None,
    };

    result.unwrap_or_else(|| DefWindowProcW(hwnd, msg, wparam, lparam))
}

fn create_window(config: &AppConfig) -> windows::core::Result<HWND> {
    unsafe {
        let hmodule = GetModuleHandleW(None)?;
        let hinstance = HINSTANCE(hmodule.0);

        let wc = WNDCLASSEXW {
            cbSize: size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc),
            hInstance: hinstance,
            hIcon: LoadIconW(None, IDI_APPLICATION).unwrap_or_default(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH::default(),
            lpszClassName: CLASS_NAME,
            ..Default::default()
        };
        if RegisterClassExW(&wc) == 0 {
            return Err(windows::core::Error::from_win32());
        }

        let geometry = config.window;
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            CLASS_NAME,
            &HSTRING::from(config.title.as_str()),
            WS_OVERLAPPEDWINDOW | WS_VSCROLL,
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
            HWND::default(),
            HMENU::default(),
            hinstance,
            None,
        )
    }
}

/// Create the main window and pump messages until it closes. Returns the
/// exit code posted with the quit message.
pub fn run(config: &AppConfig) -> anyhow::Result<i32> {
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }

    let hwnd = create_window(config)?;

    // SetMenu resizes the client area synchronously, so it runs before the
    // state is installed.
    let menu_bar = menu::create_menu_bar(&config.list_file())?;
    unsafe { SetMenu(hwnd, menu_bar)? };

    WINDOW.with(|cell| {
        *cell.borrow_mut() = Some(WindowState {
            hwnd,
            menu_bar,
            list: ShotList::new(ListStyle::default()),
            shots_dir: config.shots_dir.clone(),
            list_file: config.list_file(),
            double_buffer: config.double_buffer,
            hotkeys_registered: false,
        });
    });

    with_window(|state| {
        state.set_hotkeys_registered(true);
        state.handle(ListEvent::Resize);
    });

    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
    }
    debug!("main window shown");

    let code = unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).into() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
        msg.wParam.0 as i32
    };

    WINDOW.with(|cell| cell.borrow_mut().take());
    Ok(code)
}
