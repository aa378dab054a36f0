//! Startup configuration

use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Verbosity used when `TRACE` is unset or unreadable: warnings and errors.
pub const DEFAULT_TRACE_LEVEL: u32 = 1;

/// Initial main window placement, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 200,
            y: 100,
            width: 1200,
            height: 800,
        }
    }
}

/// Everything read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 0 silent, 1 warnings, 2 debug, 3 and up trace.
    pub trace_level: u32,
    /// Where screenshots and the list file go.
    pub shots_dir: PathBuf,
    /// Paint through an off-screen bitmap to avoid flicker.
    pub double_buffer: bool,
    pub window: WindowGeometry,
    pub title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trace_level: DEFAULT_TRACE_LEVEL,
            shots_dir: PathBuf::from("shots"),
            double_buffer: true,
            window: WindowGeometry::default(),
            title: "Screenshot List".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("TRACE") {
            config.trace_level = level.trim().parse().unwrap_or(DEFAULT_TRACE_LEVEL);
        }
        if let Some(dir) = lookup("SHOTLIST_DIR").filter(|d| !d.is_empty()) {
            config.shots_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("SHOTLIST_DOUBLE_BUFFER") {
            config.double_buffer = flag.trim() != "0";
        }

        config
    }

    /// `list.json` inside the screenshot directory.
    pub fn list_file(&self) -> PathBuf {
        self.shots_dir.join(store::LIST_FILE_NAME)
    }

    pub fn tracing_level(&self) -> LevelFilter {
        match self.trace_level {
            0 => LevelFilter::OFF,
            1 => LevelFilter::WARN,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
