//! Directory-listing file browser for the browse mode.
//!
//! Lists one directory at a time (`..` first, then directories, then files,
//! each group sorted case-insensitively) and marks entries that match the
//! configured audio extension allow-list. Carries no tag logic.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;

#[derive(Debug, Clone)]
pub struct BrowserEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_audio: bool,
}

pub struct FileBrowser {
    current_dir: PathBuf,
    entries: Vec<BrowserEntry>,
    selected: usize,
    extensions: Vec<String>,
    show_hidden: bool,
}

impl FileBrowser {
    pub fn new(dir: PathBuf, settings: &LibrarySettings) -> Self {
        let extensions = settings
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        let mut browser = Self {
            current_dir: dir,
            entries: Vec::new(),
            selected: 0,
            extensions,
            show_hidden: settings.show_hidden,
        };
        browser.refresh();
        browser
    }

    /// Re-read the current directory. An unreadable directory degrades to a
    /// listing with just the parent entry instead of failing.
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected = 0;

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(BrowserEntry {
                path: parent.to_path_buf(),
                name: "..".to_string(),
                is_dir: true,
                is_audio: false,
            });
        }

        let mut dirs = Vec::new();
        let mut files = Vec::new();

        if let Ok(read) = fs::read_dir(&self.current_dir) {
            for entry in read.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().into_owned();

                if !self.show_hidden && name.starts_with('.') {
                    continue;
                }

                let is_dir = path.is_dir();
                let is_audio = !is_dir && self.is_audio(&path);
                let entry = BrowserEntry {
                    path,
                    name,
                    is_dir,
                    is_audio,
                };

                if is_dir {
                    dirs.push(entry);
                } else {
                    files.push(entry);
                }
            }
        }

        dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        self.entries.extend(dirs);
        self.entries.extend(files);
    }

    pub fn navigate_to(&mut self, path: &Path) {
        let target = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current_dir.join(path)
        };

        if target.is_dir() {
            self.current_dir = target;
            self.refresh();
        }
    }

    pub fn go_up(&mut self) {
        if let Some(parent) = self.current_dir.parent() {
            let parent = parent.to_path_buf();
            self.navigate_to(&parent);
        }
    }

    pub fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.entries.is_empty() {
            self.selected = if self.selected == 0 {
                self.entries.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        if !self.entries.is_empty() {
            self.selected = self.entries.len() - 1;
        }
    }

    pub fn selected_entry(&self) -> Option<&BrowserEntry> {
        self.entries.get(self.selected)
    }

    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    fn is_audio(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
    }
}
