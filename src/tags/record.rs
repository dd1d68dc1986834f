/// A snapshot of everything the tag backend knows about one file.
///
/// Numeric fields use `0` as the "absent/unknown" sentinel; string fields use
/// the empty string. Consumers must suppress absent fields rather than render
/// a bare zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    pub title: String,
    pub artist: String,
    pub album_artist: String,
    pub album: String,
    pub genre: String,
    pub comment: String,
    pub codec: String,
    pub tag_type: String,
    pub release_date: String,
    pub year: u32,
    pub disc_number: u32,
    pub disc_total: u32,
    pub track_number: u32,
    pub track_total: u32,
    /// kb/s
    pub bitrate: u32,
    /// Hz
    pub sample_rate: u32,
    /// Whole seconds
    pub duration_secs: u64,
    pub channels: u32,
    pub has_image: bool,
}
