/// Display keys the user may edit.
///
/// "Date" and "Track Number" are accepted for compatibility although the
/// projection only ever emits "Year" and "Track"; pressing enter on rows
/// that do not exist simply never happens, and the predicate stays cheap.
const EDITABLE_KEYS: &[&str] = &[
    "Title",
    "Artist",
    "Album",
    "Year",
    "Date",
    "Genre",
    "Track",
    "Track Number",
];

/// Gate for entering edit mode on a row. Everything not whitelisted
/// (file facts, derived audio properties, error rows) is read-only.
pub fn is_editable(key: &str) -> bool {
    EDITABLE_KEYS.contains(&key)
}
