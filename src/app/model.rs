//! Session model: `App` and its three interaction modes.
//!
//! The state machine is Browse -> ViewMetadata -> EditField and back; every
//! transition goes through a method here, and the projection is rebuilt from
//! disk after each file selection and each successful edit.

use std::path::PathBuf;

use crate::browser::FileBrowser;
use crate::meta::{
    FileFacts, Projection, build_projection, is_editable, ordered_rows, read_error_projection,
    stat_error_projection,
};
use crate::tags::TagBackend;

/// The current interaction mode. Modes are mutually exclusive; input is
/// routed to exactly one of the browser, the table cursor or the edit buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Browse,
    ViewMetadata,
    EditField,
}

/// The main application model.
pub struct App {
    pub mode: Mode,
    pub browser: FileBrowser,
    pub selected_file: Option<PathBuf>,
    pub projection: Projection,
    /// Ordered rows derived from `projection`; rebuilt whenever it changes.
    pub rows: Vec<(String, String)>,
    /// Table cursor within `rows`.
    pub cursor: usize,
    pub editing_row: usize,
    pub editing_key: String,
    pub edit_buffer: String,
    /// Transient status line text (last save / last failure).
    pub status: Option<String>,
    /// Session-scoped diagnostic log of backend failures.
    pub diag: Vec<String>,

    backend: Box<dyn TagBackend>,
    edit_char_limit: usize,
}

impl App {
    pub fn new(backend: Box<dyn TagBackend>, browser: FileBrowser, edit_char_limit: usize) -> Self {
        Self {
            mode: Mode::Browse,
            browser,
            selected_file: None,
            projection: Projection::default(),
            rows: Vec::new(),
            cursor: 0,
            editing_row: 0,
            editing_key: String::new(),
            edit_buffer: String::new(),
            status: None,
            diag: Vec::new(),
            backend,
            edit_char_limit,
        }
    }

    /// Act on the browser's current entry: descend into directories, select
    /// audio files. Files outside the allow-list are ignored.
    pub fn activate_browser_entry(&mut self) {
        if self.mode != Mode::Browse {
            return;
        }
        let Some(entry) = self.browser.selected_entry().cloned() else {
            return;
        };

        if entry.is_dir {
            self.browser.navigate_to(&entry.path);
        } else if entry.is_audio {
            self.select_file(entry.path);
        }
    }

    /// Browse -> ViewMetadata: select `path`, rebuild the projection from
    /// disk and reset the cursor.
    pub fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
        self.status = None;
        self.edit_buffer.clear();
        self.rebuild_projection();
        self.cursor = 0;
        self.mode = Mode::ViewMetadata;
    }

    /// ViewMetadata -> Browse: discard the selection and everything derived
    /// from it.
    pub fn back_to_browse(&mut self) {
        self.mode = Mode::Browse;
        self.selected_file = None;
        self.projection = Projection::default();
        self.rows.clear();
        self.cursor = 0;
        self.status = None;
        self.edit_buffer.clear();
    }

    /// ViewMetadata -> EditField when the cursor row is editable; otherwise
    /// a no-op (the predicate gates entry, it never errors).
    pub fn begin_edit(&mut self) {
        if self.mode != Mode::ViewMetadata {
            return;
        }
        let Some((key, value)) = self.rows.get(self.cursor).cloned() else {
            return;
        };
        if !is_editable(&key) {
            return;
        }

        self.editing_row = self.cursor;
        self.editing_key = key;
        self.edit_buffer = value;
        self.mode = Mode::EditField;
    }

    /// EditField -> ViewMetadata, discarding the buffer without writing.
    pub fn cancel_edit(&mut self) {
        if self.mode != Mode::EditField {
            return;
        }
        self.edit_buffer.clear();
        self.mode = Mode::ViewMetadata;
    }

    /// Commit the edit buffer. On success the edited key is patched
    /// optimistically, then the whole projection is rebuilt from disk (the
    /// authoritative read, which may normalize the value). On failure the
    /// session stays in EditField with the buffer intact so the user can
    /// retry or cancel.
    pub fn commit_edit(&mut self) {
        if self.mode != Mode::EditField {
            return;
        }
        let Some(path) = self.selected_file.clone() else {
            return;
        };

        let key = self.editing_key.clone();
        match self
            .backend
            .write_field(&path, &key.to_lowercase(), &self.edit_buffer)
        {
            Ok(()) => {
                let value = self.edit_buffer.clone();
                self.projection.set(&key, value);
                self.rows = ordered_rows(&self.projection);
                self.rebuild_projection();
                self.edit_buffer.clear();
                self.mode = Mode::ViewMetadata;
                self.status = Some(format!("Saved {key}"));
            }
            Err(e) => {
                self.status = Some(e.to_string());
                self.diag.push(format!("{}: {e}", path.display()));
            }
        }
    }

    pub fn cursor_down(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + 1) % self.rows.len();
        }
    }

    pub fn cursor_up(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = if self.cursor == 0 {
                self.rows.len() - 1
            } else {
                self.cursor - 1
            };
        }
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = self.rows.len() - 1;
        }
    }

    pub fn push_edit_char(&mut self, c: char) {
        if self.edit_buffer.chars().count() < self.edit_char_limit {
            self.edit_buffer.push(c);
        }
    }

    pub fn pop_edit_char(&mut self) {
        self.edit_buffer.pop();
    }

    /// Rebuild the projection and its ordered rows from source-of-truth:
    /// fresh stat plus fresh backend read. Stat and read failures degrade to
    /// error rows instead of aborting the session.
    fn rebuild_projection(&mut self) {
        let Some(path) = self.selected_file.clone() else {
            return;
        };

        self.projection = match FileFacts::probe(&path) {
            Err(e) => {
                self.diag.push(format!("{}: {e}", path.display()));
                stat_error_projection(&e)
            }
            Ok(facts) => match self.backend.read(&path) {
                Ok(record) => build_projection(&facts, &record),
                Err(e) => {
                    self.diag.push(format!("{}: {e}", path.display()));
                    read_error_projection(&facts, &e)
                }
            },
        };

        self.rows = ordered_rows(&self.projection);
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
    }
}
