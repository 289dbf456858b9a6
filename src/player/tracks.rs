use serde::Deserialize;

use crate::error::{GalleryError, Result};

pub const MIDI_DIR: &str = "midis";
pub const SOUNDFONT_DIR: &str = "soundfonts/sf2";
pub const MIDI_INDEX: &str = "midis/file_list.json";
pub const SOUNDFONT_INDEX: &str = "soundfonts/sf2/soundfont_list.json";

/// A flat JSON array of file names.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FileList {
    files: Vec<String>,
}

impl FileList {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&str> {
        self.files
            .get(index)
            .map(String::as_str)
            .ok_or(GalleryError::TrackIndex {
                index,
                len: self.files.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}

/// Dropdown label for a MIDI file: `"castle_theme.mid"` -> `"CASTLE THEME"`.
pub fn option_label(file: &str) -> String {
    file.replacen(".mid", "", 1).replace('_', " ").to_uppercase()
}

/// Now-playing label: extension stripped, underscores kept.
pub fn track_info(file: &str) -> String {
    file.replacen(".mid", "", 1).to_uppercase()
}

pub fn midi_url(file: &str) -> String {
    format!("{MIDI_DIR}/{file}")
}

/// Bare names resolve under the SoundFont directory; anything with a path
/// separator is used as given.
pub fn soundfont_url(path: &str) -> String {
    if path.contains('/') {
        path.to_string()
    } else {
        format!("{SOUNDFONT_DIR}/{path}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DroppedAsset {
    SoundFont,
    Song,
}

/// Classify a dropped file by extension, ignoring case.
pub fn classify_drop(name: &str) -> Option<DroppedAsset> {
    let lower = name.to_lowercase();
    if lower.ends_with(".sf2") {
        Some(DroppedAsset::SoundFont)
    } else if lower.ends_with(".mid") {
        Some(DroppedAsset::Song)
    } else {
        None
    }
}
