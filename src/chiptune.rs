//! Square-wave melody sequencer with a short scheduling lookahead.

pub const TEMPO_BPM: f64 = 120.0;
/// How far ahead of the audio clock notes are queued.
pub const LOOKAHEAD_S: f64 = 0.1;
/// Scheduler wake-up period.
pub const TICK_MS: i32 = 25;
pub const PEAK_GAIN: f32 = 0.1;
pub const FLOOR_GAIN: f32 = 0.001;
/// Release starts this long before the note ends.
pub const RELEASE_S: f64 = 0.05;

pub const PLAY_LABEL: &str = "▶ Play 8-Bit Music";
pub const STOP_LABEL: &str = "⏹ Stop Music";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Note {
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
}

impl Note {
    pub fn frequency(self) -> f32 {
        match self {
            Note::C4 => 261.63,
            Note::D4 => 293.66,
            Note::E4 => 329.63,
            Note::F4 => 349.23,
            Note::G4 => 392.00,
            Note::A4 => 440.00,
            Note::B4 => 493.88,
            Note::C5 => 523.25,
        }
    }
}

/// `(note, length in sixteenths)`.
pub const MELODY: &[(Note, u32)] = &[
    (Note::C4, 4),
    (Note::E4, 4),
    (Note::G4, 4),
    (Note::C5, 4),
    (Note::G4, 4),
    (Note::E4, 4),
    (Note::C4, 8),
    (Note::D4, 4),
    (Note::F4, 4),
    (Note::A4, 4),
    (Note::D4, 4),
    (Note::A4, 4),
    (Note::F4, 4),
    (Note::D4, 8),
];

pub fn sixteenth_s() -> f64 {
    60.0 / TEMPO_BPM / 4.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledNote {
    pub frequency: f32,
    pub start: f64,
    pub duration: f64,
}

impl ScheduledNote {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// When the exponential release reaches the floor gain. Never earlier
    /// than the note start.
    pub fn release_end(&self) -> f64 {
        (self.end() - RELEASE_S).max(self.start)
    }
}

/// Melody cursor and playing flag, driven by the audio clock.
#[derive(Clone, Debug)]
pub struct Sequencer {
    melody: &'static [(Note, u32)],
    index: usize,
    next_note_time: f64,
    playing: bool,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(MELODY)
    }
}

impl Sequencer {
    pub fn new(melody: &'static [(Note, u32)]) -> Self {
        Self {
            melody,
            index: 0,
            next_note_time: 0.0,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &'static str {
        if self.playing {
            STOP_LABEL
        } else {
            PLAY_LABEL
        }
    }

    /// Flip between playing and stopped. Starting rewinds to the first note
    /// at `now`. Returns the new playing state.
    pub fn toggle(&mut self, now: f64) -> bool {
        if self.playing {
            self.playing = false;
        } else {
            self.playing = true;
            self.index = 0;
            self.next_note_time = now;
        }
        self.playing
    }

    /// Queue every note that starts before `now + LOOKAHEAD_S`.
    pub fn schedule(&mut self, now: f64) -> Vec<ScheduledNote> {
        let mut out = Vec::new();
        if !self.playing || self.melody.is_empty() {
            return out;
        }
        while self.next_note_time < now + LOOKAHEAD_S {
            let (note, sixteenths) = self.melody[self.index];
            let duration = sixteenth_s() * f64::from(sixteenths);
            out.push(ScheduledNote {
                frequency: note.frequency(),
                start: self.next_note_time,
                duration,
            });
            self.next_note_time += duration;
            self.index = (self.index + 1) % self.melody.len();
        }
        out
    }
}
