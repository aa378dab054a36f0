//! Saved list state for Screenshot List
//!
//! The list is kept in a small JSON file next to the screenshots. Loading is
//! forgiving: anything missing or mistyped leaves the in-memory value alone.

mod file;
mod record;

pub use file::{backup_path, load, save};
pub use record::{ListRecord, Restored};

use thiserror::Error;

/// Name of the state file inside the screenshot directory.
pub const LIST_FILE_NAME: &str = "list.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
