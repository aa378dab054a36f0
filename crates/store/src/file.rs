//! Reading and writing the list file

use crate::{ListRecord, StoreResult};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `<path>.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

/// Write `record` to `path`, keeping the previous file as `<path>.bak`.
/// The directory is created if needed.
pub fn save(path: &Path, record: &ListRecord) -> StoreResult<()> {
    let serialized = record.to_json_string()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let backup = backup_path(path);
    ignore_missing(fs::remove_file(&backup))?;
    ignore_missing(fs::rename(path, &backup))?;

    fs::write(path, format!("{serialized}\n"))?;
    debug!(path = %path.display(), "saved list");
    Ok(())
}

/// Read the record at `path`. Only I/O failures are errors; bad contents
/// are dealt with by [`ListRecord::from_json_str`].
pub fn load(path: &Path) -> StoreResult<ListRecord> {
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "loaded list");
    Ok(ListRecord::from_json_str(&text))
}

fn ignore_missing(result: std::io::Result<()>) -> std::io::Result<()> {
    match result {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

    fn record(scroll: i32) -> ListRecord {
        ListRecord {
            list_scroll: Some(scroll),
            ..ListRecord::default()
        }
    }

    #[test]
    fn backup_name() {
        assert_eq!(backup_path(Path::new("shots/list.json")), PathBuf::from("shots/list.json.bak"));
    }

    #[test]
    fn save_creates_directory_and_ends_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shots").join("list.json");

        save(&path, &record(7)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\"listScroll\":7}\n");
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn second_save_keeps_first_as_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");

        save(&path, &record(1)).unwrap();
        save(&path, &record(2)).unwrap();
        save(&path, &record(3)).unwrap();

        assert_eq!(load(&path).unwrap(), record(3));
        assert_eq!(load(&backup_path(&path)).unwrap(), record(2));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = load(&dir.path().join("list.json")).unwrap_err();

        assert!(matches!(err, StoreError::Io(e) if e.kind() == ErrorKind::NotFound));
    }

    #[test]
    fn load_garbage_is_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "}}}").unwrap();

        assert_eq!(load(&path).unwrap(), ListRecord::default());
    }
}
