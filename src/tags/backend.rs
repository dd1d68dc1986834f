use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::FileType;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag, TagType};
use thiserror::Error;

use super::record::MetadataRecord;

/// Errors surfaced by a tag backend.
///
/// The backend does not distinguish sub-reasons (unsupported format,
/// permissions, malformed file); the wrapped message carries whatever the
/// underlying library reported.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to read metadata: {0}")]
    ReadFailed(String),
    #[error("failed to write metadata: {0}")]
    WriteFailed(String),
}

/// The tag I/O seam. The session state machine only ever talks to this
/// trait, so tests can swap in a deterministic fake.
pub trait TagBackend {
    fn read(&self, path: &Path) -> Result<MetadataRecord, TagError>;

    /// Write a single named field. `field` is the lower-cased display key;
    /// anything outside the fixed editable set fails with `WriteFailed`.
    /// The on-disk file is mutated; refreshing the in-memory view is the
    /// caller's job (via a fresh `read`).
    fn write_field(&self, path: &Path, field: &str, value: &str) -> Result<(), TagError>;
}

/// The fields a backend knows how to write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum EditableField {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Track,
    Date,
}

impl EditableField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "artist" => Some(Self::Artist),
            "album" => Some(Self::Album),
            "year" => Some(Self::Year),
            "genre" => Some(Self::Genre),
            "track" => Some(Self::Track),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

/// Parse a track value as entered by the user: `"7"` or `"7/12"`.
/// Accepts the same shape the projection renders, so round-trip edits work.
fn parse_track_value(value: &str) -> Result<(u32, Option<u32>), TagError> {
    let invalid = || TagError::WriteFailed(format!("invalid track \"{value}\""));
    match value.trim().split_once('/') {
        Some((n, total)) => {
            let n = n.trim().parse().map_err(|_| invalid())?;
            let total = total.trim().parse().map_err(|_| invalid())?;
            Ok((n, Some(total)))
        }
        None => Ok((value.trim().parse().map_err(|_| invalid())?, None)),
    }
}

fn codec_name(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Mpeg => "MP3",
        FileType::Flac => "FLAC",
        FileType::Opus => "Opus",
        FileType::Vorbis => "OGG Vorbis",
        FileType::Aac => "AAC",
        FileType::Mp4 => "MP4",
        FileType::Aiff => "AIFF",
        FileType::Wav => "WAV",
        FileType::WavPack => "WavPack",
        FileType::Ape => "APE",
        FileType::Mpc => "MPC",
        _ => "",
    }
}

fn tag_type_name(tag_type: TagType) -> &'static str {
    match tag_type {
        TagType::Id3v1 => "ID3v1",
        TagType::Id3v2 => "ID3v2",
        TagType::Mp4Ilst => "MP4 ilst",
        TagType::VorbisComments => "Vorbis Comments",
        TagType::Ape => "APE",
        TagType::RiffInfo => "RIFF INFO",
        TagType::AiffText => "AIFF text",
        _ => "",
    }
}

/// Tag backend built on `lofty`.
///
/// A file that parses but carries no tag yields a record with empty string
/// fields rather than an error; only an unreadable/unparseable file is a
/// `ReadFailed`.
pub struct LoftyBackend;

impl TagBackend for LoftyBackend {
    fn read(&self, path: &Path) -> Result<MetadataRecord, TagError> {
        let tagged = Probe::open(path)
            .map_err(|e| TagError::ReadFailed(e.to_string()))?
            .read()
            .map_err(|e| TagError::ReadFailed(e.to_string()))?;

        let props = tagged.properties();
        let mut record = MetadataRecord {
            codec: codec_name(tagged.file_type()).to_string(),
            bitrate: props.audio_bitrate().unwrap_or(0),
            sample_rate: props.sample_rate().unwrap_or(0),
            duration_secs: props.duration().as_secs(),
            channels: props.channels().map(u32::from).unwrap_or(0),
            ..MetadataRecord::default()
        };

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            record.tag_type = tag_type_name(tag.tag_type()).to_string();
            record.title = tag.title().map(|s| s.to_string()).unwrap_or_default();
            record.artist = tag.artist().map(|s| s.to_string()).unwrap_or_default();
            record.album = tag.album().map(|s| s.to_string()).unwrap_or_default();
            record.album_artist = tag
                .get_string(ItemKey::AlbumArtist)
                .unwrap_or_default()
                .to_string();
            record.genre = tag.genre().map(|s| s.to_string()).unwrap_or_default();
            record.comment = tag.comment().map(|s| s.to_string()).unwrap_or_default();
            record.release_date = tag
                .get_string(ItemKey::RecordingDate)
                .unwrap_or_default()
                .to_string();
            record.year = tag
                .get_string(ItemKey::Year)
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
            record.track_number = tag.track().unwrap_or(0);
            record.track_total = tag.track_total().unwrap_or(0);
            record.disc_number = tag.disk().unwrap_or(0);
            record.disc_total = tag.disk_total().unwrap_or(0);
            record.has_image = !tag.pictures().is_empty();
        }

        Ok(record)
    }

    fn write_field(&self, path: &Path, field: &str, value: &str) -> Result<(), TagError> {
        let field = EditableField::parse(field)
            .ok_or_else(|| TagError::WriteFailed(format!("unsupported field \"{field}\"")))?;

        let mut tagged = Probe::open(path)
            .map_err(|e| TagError::WriteFailed(e.to_string()))?
            .read()
            .map_err(|e| TagError::WriteFailed(e.to_string()))?;

        // Untagged file: start a tag of the format's primary type.
        if tagged.primary_tag().is_none() {
            let tag_type = tagged.primary_tag_type();
            tagged.insert_tag(Tag::new(tag_type));
        }

        {
            let tag = tagged
                .primary_tag_mut()
                .ok_or_else(|| TagError::WriteFailed("no writable tag".to_string()))?;

            match field {
                EditableField::Title => tag.set_title(value.to_string()),
                EditableField::Artist => tag.set_artist(value.to_string()),
                EditableField::Album => tag.set_album(value.to_string()),
                EditableField::Genre => tag.set_genre(value.to_string()),
                EditableField::Year => {
                    let year: u32 = value
                        .trim()
                        .parse()
                        .map_err(|_| TagError::WriteFailed(format!("invalid year \"{value}\"")))?;
                    let _ = tag.insert_text(ItemKey::Year, year.to_string());
                }
                EditableField::Track => {
                    let (number, total) = parse_track_value(value)?;
                    tag.set_track(number);
                    match total {
                        Some(total) => tag.set_track_total(total),
                        None => {
                            tag.remove_track_total();
                        }
                    }
                }
                EditableField::Date => {
                    let _ = tag.insert_text(ItemKey::RecordingDate, value.to_string());
                }
            }
        }

        tagged
            .save_to_path(path, WriteOptions::default())
            .map_err(|e| TagError::WriteFailed(e.to_string()))
    }
}
