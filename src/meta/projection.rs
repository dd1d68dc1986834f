use std::io;
use std::path::Path;
use std::time::SystemTime;
use std::{fs, time::UNIX_EPOCH};

use chrono::{DateTime, Local};

use crate::tags::{MetadataRecord, TagError};

/// Filesystem facts about the selected file, captured once per rebuild.
#[derive(Debug, Clone)]
pub struct FileFacts {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub modified: SystemTime,
    /// Lower-cased extension without the leading dot; empty when absent.
    pub ext: String,
}

impl FileFacts {
    /// Stat `path`. A failure here is the "file vanished mid-session" case
    /// and is surfaced by the caller as a single error row.
    pub fn probe(path: &Path) -> io::Result<Self> {
        let meta = fs::metadata(path)?;
        Ok(Self {
            name: path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.display().to_string(),
            size: meta.len(),
            modified: meta.modified().unwrap_or(UNIX_EPOCH),
            ext: path
                .extension()
                .and_then(|s| s.to_str())
                .map(|s| s.to_ascii_lowercase())
                .unwrap_or_default(),
        })
    }
}

/// An insertion-ordered display-key -> display-value mapping.
///
/// Keys are not statically known (tagless files, error rows), so this is a
/// small ordered map rather than a struct of fields. Re-setting an existing
/// key keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    entries: Vec<(String, String)>,
}

impl Projection {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Human-readable size: bytes below 1 KB, then KB/MB/GB at 1024 thresholds.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match size {
        s if s >= GB => format!("{:.2} GB", s as f64 / GB as f64),
        s if s >= MB => format!("{:.2} MB", s as f64 / MB as f64),
        s if s >= KB => format!("{:.2} KB", s as f64 / KB as f64),
        s => format!("{s} bytes"),
    }
}

/// `M:SS` with no hour component; minutes accumulate past 59.
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn format_modified(modified: SystemTime) -> String {
    DateTime::<Local>::from(modified)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { "Unknown" } else { value }
}

fn file_entries(facts: &FileFacts) -> Projection {
    let mut p = Projection::default();
    p.set("File Name", facts.name.clone());
    p.set("File Path", facts.path.clone());
    p.set("File Size", format_file_size(facts.size));
    p.set("Modified", format_modified(facts.modified));
    p.set("Format", facts.ext.clone());
    p
}

/// Build the full projection from filesystem facts plus a backend record.
///
/// Title/Artist/Album are always present (falling back to `"Unknown"`);
/// every other metadata key is suppressed when its value is the zero/empty
/// sentinel.
pub fn build_projection(facts: &FileFacts, record: &MetadataRecord) -> Projection {
    let mut p = file_entries(facts);

    p.set("Title", or_unknown(&record.title));
    p.set("Artist", or_unknown(&record.artist));
    p.set("Album", or_unknown(&record.album));

    if record.year > 0 {
        p.set("Year", record.year.to_string());
    }
    if !record.genre.is_empty() {
        p.set("Genre", record.genre.clone());
    }
    if record.track_number > 0 {
        let track = if record.track_total > 0 {
            format!("{}/{}", record.track_number, record.track_total)
        } else {
            record.track_number.to_string()
        };
        p.set("Track", track);
    }
    if record.bitrate > 0 {
        p.set("Bitrate", format!("{} kbps", record.bitrate));
    }
    if record.duration_secs > 0 {
        p.set("Duration", format_duration(record.duration_secs));
    }
    if record.sample_rate > 0 {
        p.set("Sample Rate", format!("{} Hz", record.sample_rate));
    }
    if !record.codec.is_empty() {
        p.set("Codec", record.codec.clone());
    }

    p
}

/// The stat probe failed: the projection is one error row and nothing else.
pub fn stat_error_projection(err: &io::Error) -> Projection {
    let mut p = Projection::default();
    p.set("Error", err.to_string());
    p
}

/// The backend could not produce a record: keep the file facts, append one
/// error row, emit no metadata keys.
pub fn read_error_projection(facts: &FileFacts, err: &TagError) -> Projection {
    let mut p = file_entries(facts);
    p.set("Error", err.to_string());
    p
}
