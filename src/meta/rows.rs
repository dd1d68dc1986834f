use super::projection::Projection;

/// Display order for known keys. Some entries ("Date", "Track Number",
/// "Bit Depth", "ID3 Version") never come out of the projection today but
/// keep their slot so future keys land in a sensible place.
const PROPERTY_ORDER: &[&str] = &[
    "File Name",
    "File Path",
    "File Size",
    "Modified",
    "Format",
    "Title",
    "Artist",
    "Album",
    "Year",
    "Date",
    "Genre",
    "Track",
    "Track Number",
    "Bitrate",
    "Duration",
    "Sample Rate",
    "Bit Depth",
    "ID3 Version",
    "Codec",
];

/// Flatten a projection into the ordered row sequence the table renders:
/// priority-listed keys first, then any remaining keys in insertion order.
/// Deterministic for a given projection.
pub fn ordered_rows(projection: &Projection) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = Vec::with_capacity(projection.len());

    for &key in PROPERTY_ORDER {
        if let Some(value) = projection.get(key) {
            rows.push((key.to_string(), value.to_string()));
        }
    }

    for (key, value) in projection.iter() {
        if !PROPERTY_ORDER.contains(&key) {
            rows.push((key.to_string(), value.to_string()));
        }
    }

    rows
}
