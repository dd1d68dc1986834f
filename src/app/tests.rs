use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use tempfile::tempdir;

use super::*;
use crate::browser::FileBrowser;
use crate::config::LibrarySettings;
use crate::tags::{MetadataRecord, TagBackend, TagError};

#[derive(Default)]
struct BackendState {
    record: MetadataRecord,
    fail_read: bool,
    fail_write: bool,
    writes: Vec<(String, String)>,
}

/// Deterministic in-memory backend: reads echo the stored record, writes
/// mutate it so the authoritative re-read sees the new value.
#[derive(Clone, Default)]
struct FakeBackend(Rc<RefCell<BackendState>>);

impl TagBackend for FakeBackend {
    fn read(&self, _path: &Path) -> Result<MetadataRecord, TagError> {
        let state = self.0.borrow();
        if state.fail_read {
            return Err(TagError::ReadFailed("corrupt header".to_string()));
        }
        Ok(state.record.clone())
    }

    fn write_field(&self, _path: &Path, field: &str, value: &str) -> Result<(), TagError> {
        let mut state = self.0.borrow_mut();
        if state.fail_write {
            return Err(TagError::WriteFailed("read-only filesystem".to_string()));
        }

        match field {
            "title" => state.record.title = value.to_string(),
            "artist" => state.record.artist = value.to_string(),
            "album" => state.record.album = value.to_string(),
            "genre" => state.record.genre = value.to_string(),
            "year" => state.record.year = value.parse().unwrap_or(0),
            "track" => match value.split_once('/') {
                Some((n, total)) => {
                    state.record.track_number = n.parse().unwrap_or(0);
                    state.record.track_total = total.parse().unwrap_or(0);
                }
                None => {
                    state.record.track_number = value.parse().unwrap_or(0);
                    state.record.track_total = 0;
                }
            },
            "date" => state.record.release_date = value.to_string(),
            other => {
                return Err(TagError::WriteFailed(format!("unsupported field \"{other}\"")));
            }
        }

        state.writes.push((field.to_string(), value.to_string()));
        Ok(())
    }
}

fn app_over(dir: &Path, backend: FakeBackend) -> App {
    let browser = FileBrowser::new(dir.to_path_buf(), &LibrarySettings::default());
    App::new(Box::new(backend), browser, 256)
}

fn move_cursor_to(app: &mut App, key: &str) {
    app.cursor = app
        .rows
        .iter()
        .position(|(k, _)| k == key)
        .unwrap_or_else(|| panic!("no row {key}"));
}

fn select_browser_entry(app: &mut App, name: &str) {
    while app.browser.selected_entry().map(|e| e.name.as_str()) != Some(name) {
        app.browser.select_next();
    }
}

#[test]
fn starts_in_browse_mode_with_nothing_selected() {
    let dir = tempdir().unwrap();
    let app = app_over(dir.path(), FakeBackend::default());
    assert_eq!(app.mode, Mode::Browse);
    assert!(app.selected_file.is_none());
    assert!(app.rows.is_empty());
}

#[test]
fn selecting_an_audio_file_enters_view_and_builds_rows() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("song.mp3"), b"xxxx").unwrap();

    let backend = FakeBackend::default();
    backend.0.borrow_mut().record.title = "Solitude".to_string();

    let mut app = app_over(dir.path(), backend);
    select_browser_entry(&mut app, "song.mp3");
    app.activate_browser_entry();

    assert_eq!(app.mode, Mode::ViewMetadata);
    assert_eq!(app.cursor, 0);
    assert!(app.selected_file.is_some());
    assert_eq!(app.projection.get("Title"), Some("Solitude"));
    assert_eq!(app.rows[0].0, "File Name");
}

#[test]
fn activating_a_non_audio_file_never_changes_mode() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();

    let mut app = app_over(dir.path(), FakeBackend::default());
    select_browser_entry(&mut app, "notes.txt");
    app.activate_browser_entry();

    assert_eq!(app.mode, Mode::Browse);
    assert!(app.selected_file.is_none());
}

#[test]
fn activating_a_directory_descends_instead_of_selecting() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("album")).unwrap();

    let mut app = app_over(dir.path(), FakeBackend::default());
    select_browser_entry(&mut app, "album");
    app.activate_browser_entry();

    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.browser.current_dir(), dir.path().join("album"));
}

#[test]
fn escape_from_view_discards_selection_and_projection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.flac");
    fs::write(&path, b"x").unwrap();

    let mut app = app_over(dir.path(), FakeBackend::default());
    app.select_file(path);
    assert_eq!(app.mode, Mode::ViewMetadata);

    app.back_to_browse();
    assert_eq!(app.mode, Mode::Browse);
    assert!(app.selected_file.is_none());
    assert!(app.projection.is_empty());
    assert!(app.rows.is_empty());
}

#[test]
fn enter_on_a_non_editable_row_is_a_noop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    fs::write(&path, b"x").unwrap();

    let mut app = app_over(dir.path(), FakeBackend::default());
    app.select_file(path);
    move_cursor_to(&mut app, "File Name");
    let cursor = app.cursor;

    app.begin_edit();
    assert_eq!(app.mode, Mode::ViewMetadata);
    assert_eq!(app.cursor, cursor);
    assert!(app.edit_buffer.is_empty());
}

#[test]
fn enter_on_an_editable_row_seeds_the_buffer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    fs::write(&path, b"x").unwrap();

    let backend = FakeBackend::default();
    backend.0.borrow_mut().record.title = "Iron Man".to_string();

    let mut app = app_over(dir.path(), backend);
    app.select_file(path);
    move_cursor_to(&mut app, "Title");

    app.begin_edit();
    assert_eq!(app.mode, Mode::EditField);
    assert_eq!(app.editing_key, "Title");
    assert_eq!(app.editing_row, app.cursor);
    assert_eq!(app.edit_buffer, "Iron Man");
}

#[test]
fn commit_round_trips_through_the_backend() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    fs::write(&path, b"x").unwrap();

    let backend = FakeBackend::default();
    let state = backend.0.clone();

    let mut app = app_over(dir.path(), backend);
    app.select_file(path);
    move_cursor_to(&mut app, "Title");
    app.begin_edit();

    app.edit_buffer.clear();
    for c in "War Pigs".chars() {
        app.push_edit_char(c);
    }
    app.commit_edit();

    assert_eq!(app.mode, Mode::ViewMetadata);
    assert_eq!(app.projection.get("Title"), Some("War Pigs"));
    assert_eq!(app.status.as_deref(), Some("Saved Title"));
    assert_eq!(
        state.borrow().writes,
        vec![("title".to_string(), "War Pigs".to_string())]
    );
}

#[test]
fn commit_sends_the_lower_cased_key_to_the_backend() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    fs::write(&path, b"x").unwrap();

    let backend = FakeBackend::default();
    backend.0.borrow_mut().record.track_number = 3;
    backend.0.borrow_mut().record.track_total = 8;
    let state = backend.0.clone();

    let mut app = app_over(dir.path(), backend);
    app.select_file(path);
    move_cursor_to(&mut app, "Track");
    app.begin_edit();
    assert_eq!(app.edit_buffer, "3/8");

    app.edit_buffer = "4/8".to_string();
    app.commit_edit();

    assert_eq!(state.borrow().writes[0].0, "track");
    assert_eq!(app.projection.get("Track"), Some("4/8"));
}

#[test]
fn failed_write_stays_in_edit_mode_with_the_buffer_intact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    fs::write(&path, b"x").unwrap();

    let backend = FakeBackend::default();
    backend.0.borrow_mut().fail_write = true;

    let mut app = app_over(dir.path(), backend);
    app.select_file(path);
    move_cursor_to(&mut app, "Artist");
    app.begin_edit();
    app.edit_buffer = "Dio".to_string();
    app.commit_edit();

    assert_eq!(app.mode, Mode::EditField);
    assert_eq!(app.edit_buffer, "Dio");
    assert!(app.status.as_deref().unwrap().contains("read-only"));
    assert_eq!(app.diag.len(), 1);
}

#[test]
fn cancel_discards_the_buffer_without_writing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    fs::write(&path, b"x").unwrap();

    let backend = FakeBackend::default();
    let state = backend.0.clone();

    let mut app = app_over(dir.path(), backend);
    app.select_file(path);
    move_cursor_to(&mut app, "Album");
    app.begin_edit();
    app.push_edit_char('!');
    app.cancel_edit();

    assert_eq!(app.mode, Mode::ViewMetadata);
    assert!(app.edit_buffer.is_empty());
    assert!(state.borrow().writes.is_empty());
}

#[test]
fn read_failure_degrades_to_an_error_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    fs::write(&path, b"x").unwrap();

    let backend = FakeBackend::default();
    backend.0.borrow_mut().fail_read = true;

    let mut app = app_over(dir.path(), backend);
    app.select_file(path);

    assert_eq!(app.mode, Mode::ViewMetadata);
    assert_eq!(app.projection.get("File Name"), Some("song.mp3"));
    assert!(app.projection.get("Error").unwrap().contains("corrupt header"));
    assert!(!app.projection.contains_key("Title"));
}

#[test]
fn stat_failure_yields_a_single_error_row() {
    let dir = tempdir().unwrap();

    let mut app = app_over(dir.path(), FakeBackend::default());
    app.select_file(dir.path().join("vanished.mp3"));

    assert_eq!(app.mode, Mode::ViewMetadata);
    assert_eq!(app.rows.len(), 1);
    assert_eq!(app.rows[0].0, "Error");
}

#[test]
fn cursor_wraps_over_the_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    fs::write(&path, b"x").unwrap();

    let mut app = app_over(dir.path(), FakeBackend::default());
    app.select_file(path);

    let last = app.rows.len() - 1;
    app.cursor_up();
    assert_eq!(app.cursor, last);
    app.cursor_down();
    assert_eq!(app.cursor, 0);
    app.cursor_last();
    assert_eq!(app.cursor, last);
    app.cursor_first();
    assert_eq!(app.cursor, 0);
}

#[test]
fn edit_buffer_respects_the_char_limit() {
    let dir = tempdir().unwrap();
    let browser = FileBrowser::new(dir.path().to_path_buf(), &LibrarySettings::default());
    let mut app = App::new(Box::new(FakeBackend::default()), browser, 4);

    app.mode = Mode::EditField;
    for c in "abcdef".chars() {
        app.push_edit_char(c);
    }
    assert_eq!(app.edit_buffer, "abcd");

    app.pop_edit_char();
    assert_eq!(app.edit_buffer, "abc");
}
