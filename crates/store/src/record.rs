//! The persisted shape of the list

use crate::StoreResult;
use capture::Screenshot;
use listview::{RestoredState, ShotList};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::warn;

/// Everything saved about the list. Each field is optional so a partial file
/// only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<PathBuf>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_width: Option<i32>,
    /// -1 for no selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_scroll: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotkeys_registered: Option<bool>,
}

/// A loaded record, ready to merge into the running application.
pub struct Restored {
    pub state: RestoredState<Screenshot>,
    pub hotkeys_registered: Option<bool>,
}

impl ListRecord {
    /// Snapshot of a live list.
    pub fn from_list(list: &ShotList<Screenshot>, hotkeys_registered: bool) -> Self {
        Self {
            screenshots: Some(list.shots().map(|shot| shot.path().to_path_buf()).collect()),
            list_width: Some(list.list_width()),
            selected_index: Some(list.selected_index().map_or(-1, |i| i as i32)),
            list_scroll: Some(list.list_scroll()),
            hotkeys_registered: Some(hotkeys_registered),
        }
    }

    /// Parse a saved record, dropping whatever does not fit.
    ///
    /// Malformed JSON reads as an empty record. A field with the wrong type is
    /// treated as absent, and so is each non-string entry of `screenshots`.
    pub fn from_json_str(text: &str) -> Self {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "malformed list file, ignoring its contents");
                return Self::default();
            }
        };

        let Value::Object(map) = value else {
            warn!("list file does not hold a JSON object");
            return Self::default();
        };

        Self {
            screenshots: map.get("screenshots").and_then(screenshot_paths),
            list_width: field(&map, "listWidth"),
            selected_index: field(&map, "selectedIndex"),
            list_scroll: field(&map, "listScroll"),
            hotkeys_registered: field(&map, "hotkeysRegistered"),
        }
    }

    pub fn to_json_string(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Read the named screenshots from disk. Ones that fail to load are
    /// left out.
    pub fn into_restored(self) -> Restored {
        let shots = self.screenshots.map(|paths| {
            paths
                .into_iter()
                .filter_map(|path| match Screenshot::load_bmp(&path) {
                    Ok(shot) => Some(shot),
                    Err(err) => {
                        warn!(path = %path.display(), %err, "skipping screenshot");
                        None
                    }
                })
                .collect()
        });

        Restored {
            state: RestoredState {
                shots,
                list_width: self.list_width,
                selected_index: self.selected_index,
                list_scroll: self.list_scroll,
            },
            hotkeys_registered: self.hotkeys_registered,
        }
    }
}

fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(key, %err, "ignoring list file field");
            None
        }
    }
}

fn screenshot_paths(value: &Value) -> Option<Vec<PathBuf>> {
    let Some(entries) = value.as_array() else {
        warn!("ignoring list file field screenshots: not an array");
        return None;
    };

    let paths = entries
        .iter()
        .filter_map(|entry| match entry.as_str() {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                warn!(%entry, "ignoring screenshot entry that is not a path");
                None
            }
        })
        .collect();
    Some(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use listview::{ListHost, ListStyle, ScrollInfo};
    use std::path::Path;

    struct StillHost;

    impl ListHost for StillHost {
        type Shot = Screenshot;

        fn viewport_height(&self) -> i32 {
            100
        }

        fn set_scroll_info(&mut self, _info: ScrollInfo) {}

        fn request_redraw(&mut self) {}

        fn capture_shot(&mut self) -> Screenshot {
            unreachable!("no captures in these tests")
        }

        fn request_quit(&mut self) {}
    }

    fn saved_shot(dir: &Path, name: &str) -> Screenshot {
        let shot = Screenshot::from_bgra(8, 4, vec![90; 8 * 4 * 4], dir.join(name)).unwrap();
        shot.save_bmp().unwrap();
        shot
    }

    #[test]
    fn snapshot_of_live_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = ShotList::new(ListStyle::default());
        list.push_shot(&mut StillHost, saved_shot(dir.path(), "old.bmp"));
        list.push_shot(&mut StillHost, saved_shot(dir.path(), "new.bmp"));

        let record = ListRecord::from_list(&list, true);

        assert_eq!(
            record.screenshots,
            Some(vec![dir.path().join("new.bmp"), dir.path().join("old.bmp")])
        );
        assert_eq!(record.list_width, Some(400));
        assert_eq!(record.selected_index, Some(0));
        assert_eq!(record.list_scroll, Some(0));
        assert_eq!(record.hotkeys_registered, Some(true));
    }

    #[test]
    fn empty_list_saves_minus_one() {
        let list: ShotList<Screenshot> = ShotList::new(ListStyle::default());

        let json = ListRecord::from_list(&list, false).to_json_string().unwrap();

        assert_eq!(
            json,
            r#"{"screenshots":[],"listWidth":400,"selectedIndex":-1,"listScroll":0,"hotkeysRegistered":false}"#
        );
    }

    #[test]
    fn only_scroll() {
        let record = ListRecord::from_json_str(r#"{"listScroll": 35}"#);

        assert_eq!(
            record,
            ListRecord {
                list_scroll: Some(35),
                ..ListRecord::default()
            }
        );
    }

    #[test]
    fn mistyped_fields_are_dropped() {
        let record = ListRecord::from_json_str(
            r#"{"listWidth": "wide", "selectedIndex": 2, "listScroll": 1.5,
                "hotkeysRegistered": 1, "screenshots": ["a.bmp", 7, "b.bmp"]}"#,
        );

        assert_eq!(record.list_width, None);
        assert_eq!(record.selected_index, Some(2));
        assert_eq!(record.list_scroll, None);
        assert_eq!(record.hotkeys_registered, None);
        assert_eq!(
            record.screenshots,
            Some(vec![PathBuf::from("a.bmp"), PathBuf::from("b.bmp")])
        );
    }

    #[test]
    fn malformed_json_is_empty() {
        assert_eq!(ListRecord::from_json_str("{ not json"), ListRecord::default());
        assert_eq!(ListRecord::from_json_str("[1, 2]"), ListRecord::default());
        assert_eq!(ListRecord::from_json_str(""), ListRecord::default());
    }

    #[test]
    fn missing_screenshots_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let kept = saved_shot(dir.path(), "kept.bmp");
        let record = ListRecord {
            screenshots: Some(vec![dir.path().join("gone.bmp"), kept.path().to_path_buf()]),
            selected_index: Some(1),
            ..ListRecord::default()
        };

        let restored = record.into_restored();

        let shots = restored.state.shots.unwrap();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].path(), kept.path());
        assert_eq!((shots[0].width(), shots[0].height()), (8, 4));
        assert_eq!(restored.state.selected_index, Some(1));
        assert_eq!(restored.state.list_width, None);
        assert_eq!(restored.hotkeys_registered, None);
    }

    #[test]
    fn restore_clamps_selection_after_skips() {
        let dir = tempfile::tempdir().unwrap();
        let kept = saved_shot(dir.path(), "kept.bmp");
        let record = ListRecord {
            screenshots: Some(vec![kept.path().to_path_buf(), dir.path().join("gone.bmp")]),
            selected_index: Some(1),
            ..ListRecord::default()
        };

        let mut list = ShotList::new(ListStyle::default());
        list.restore(&mut StillHost, record.into_restored().state);

        assert_eq!(list.len(), 1);
        assert_eq!(list.selected_index(), Some(0));
    }
}
