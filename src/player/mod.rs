//! MIDI player control surface. The synthesizer itself is an external
//! library; this module owns the session state and the command table.

pub mod notes;
mod session;
pub mod spectrum;
mod tracks;

pub use session::{Command, Effect, PlayerSession, PAUSE_GLYPH, PLAY_GLYPH};
pub use tracks::{
    classify_drop, midi_url, option_label, soundfont_url, track_info, DroppedAsset, FileList,
    MIDI_INDEX, SOUNDFONT_INDEX,
};
