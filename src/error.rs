use thiserror::Error;

/// Failures raised by the gallery, the audio toys and the player session.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("{0} context not supported")]
    NoContext(&'static str),

    #[error("track index {index} out of range ({len} tracks)")]
    TrackIndex { index: usize, len: usize },

    #[error("invalid list: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
