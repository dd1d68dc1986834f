use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/forte/config.toml` or
/// `~/.config/forte/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `FORTE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub editing: EditingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui: UiSettings::default(),
            library: LibrarySettings::default(),
            editing: EditingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ forte: read tags loudly ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions treated as selectable audio (case-insensitive,
    /// without dot).
    pub extensions: Vec<String>,
    /// Whether the browser lists hidden files/directories (dotfiles).
    pub show_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "m4a".into(),
                "flac".into(),
                "ogg".into(),
                "wav".into(),
                "aiff".into(),
                "wma".into(),
                "aac".into(),
                "opus".into(),
                "ape".into(),
                "wv".into(),
                "mpc".into(),
            ],
            show_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditingSettings {
    /// Maximum number of characters accepted by the edit buffer.
    pub char_limit: usize,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self { char_limit: 256 }
    }
}
