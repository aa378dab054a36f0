//! File names for new screenshots

use crate::{CaptureError, CaptureResult};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Highest disambiguation suffix tried before giving up.
pub const MAX_SUFFIX: u32 = 99;

/// `YYYY-MM-DDThh-mm-ss.bmp`, with `sNN` before the extension for
/// `suffix >= 2`. The "s" stands for "shot".
pub fn shot_file_name(time: &NaiveDateTime, suffix: u32) -> String {
    let stamp = time.format("%Y-%m-%dT%H-%M-%S");
    if suffix > 1 {
        format!("{stamp}s{suffix:02}.bmp")
    } else {
        format!("{stamp}.bmp")
    }
}

/// First name for `time` that does not exist yet in `dir`.
pub fn unique_shot_path(dir: &Path, time: NaiveDateTime) -> CaptureResult<PathBuf> {
    for suffix in 1..=MAX_SUFFIX {
        let path = dir.join(shot_file_name(&time, suffix));
        if !path.exists() {
            return Ok(path);
        }
        debug!(path = %path.display(), "screenshot name taken");
    }

    Err(CaptureError::NoFreeName(dir.to_path_buf()))
}
