//! Falling-note display fed by the synthesizer's note-on events, plus the
//! small text helpers the player shows next to it.

use crate::sim::{frames, hsl, Simulation};

/// MIDI key range drawn across the canvas width.
pub const KEYS: f64 = 128.0;
/// Pixels a note falls per reference frame.
pub const FALL_PER_FRAME: f64 = 2.0;
pub const NOTE_HEIGHT: f64 = 10.0;
const CHANNEL_HUE_STEP: f64 = 25.0;

#[derive(Clone, Debug, PartialEq)]
pub struct FallingNote {
    pub key: u8,
    pub velocity: u8,
    pub channel: u8,
    pub y: f64,
}

impl FallingNote {
    pub fn color(&self) -> String {
        hsl(f64::from(self.channel) * CHANNEL_HUE_STEP, 100, 50)
    }

    /// `(x, y, width, height)` on a canvas `width` pixels wide.
    pub fn rect(&self, width: f64) -> (f64, f64, f64, f64) {
        let key_width = width / KEYS;
        (f64::from(self.key) * key_width, self.y, key_width, NOTE_HEIGHT)
    }
}

/// Notes spawned at the top edge that fall until they leave the canvas.
#[derive(Clone, Debug, Default)]
pub struct NoteRain {
    height: f64,
    notes: Vec<FallingNote>,
}

impl NoteRain {
    pub fn new(height: f64) -> Self {
        Self {
            height: height.max(0.0),
            notes: Vec::new(),
        }
    }

    pub fn note_on(&mut self, key: u8, velocity: u8, channel: u8) {
        self.notes.push(FallingNote {
            key: key.min(127),
            velocity,
            channel,
            y: 0.0,
        });
    }

    /// Follow the canvas when the page resizes it.
    pub fn set_height(&mut self, height: f64) {
        self.height = height.max(0.0);
    }

    pub fn notes(&self) -> &[FallingNote] {
        &self.notes
    }
}

impl Simulation for NoteRain {
    fn advance(&mut self, dt: f64) {
        let step = FALL_PER_FRAME * frames(dt);
        let floor = self.height;
        self.notes.retain_mut(|n| {
            n.y += step;
            n.y <= floor
        });
    }
}

/// `mm:ss`, whole seconds. Minutes keep counting past 99.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// `"01:05 / 03:20"`.
pub fn time_label(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}

/// True once playback reached the end of a song with a known length.
pub fn track_ended(current: f64, duration: f64) -> bool {
    let total = duration.floor();
    total > 0.0 && current.floor() >= total
}

/// Download status for a SoundFont, reported on every tenth percent.
/// Without a content length there is nothing to report.
pub fn download_status(loaded: u64, total: Option<u64>) -> Option<String> {
    let total = total.filter(|&t| t > 0)?;
    let percent = (loaded.min(total) * 100) / total;
    (percent % 10 == 0).then(|| format!("DL SF2 ({percent}%)..."))
}
