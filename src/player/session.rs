use super::tracks::{classify_drop, midi_url, soundfont_url, track_info, DroppedAsset, FileList};

pub const PLAY_GLYPH: &str = "▶";
pub const PAUSE_GLYPH: &str = "⏸";

/// UI action identifiers the control surface dispatches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// The synthesizer and sequencer finished initialising.
    Ready,
    /// Play/pause button.
    Toggle,
    Stop,
    Next,
    Prev,
    /// Pick a track from the list; starts playback once loaded.
    Select(usize),
    SelectSoundFont(String),
    /// The requested track finished loading.
    Loaded,
    LoadFailed,
    Dropped(String),
    /// A dropped song finished loading into the sequencer.
    DroppedLoaded(String),
}

/// Side effects the browser glue performs against the sequencer and DOM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    LoadTrack { index: usize, url: String },
    LoadSoundFont { url: String },
    LoadDroppedSong,
    LoadDroppedSoundFont,
    Play,
    Pause,
    /// Rewind to zero and stop.
    Stop,
    Status(String),
    PlayLabel(&'static str),
    TrackInfo(String),
    HighlightTrack(usize),
}

/// Player state for one page session.
#[derive(Clone, Debug, Default)]
pub struct PlayerSession {
    tracks: FileList,
    current: usize,
    playing: bool,
    loaded: bool,
    ready: bool,
}

impl PlayerSession {
    pub fn new(tracks: FileList) -> Self {
        Self {
            tracks,
            ..Self::default()
        }
    }

    pub fn tracks(&self) -> &FileList {
        &self.tracks
    }

    pub fn set_tracks(&mut self, tracks: FileList) {
        self.tracks = tracks;
        self.current = 0;
        self.loaded = false;
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Ready => {
                self.ready = true;
                vec![Effect::Status("READY".into())]
            }
            _ if !self.ready => Vec::new(),
            Command::Toggle => self.toggle(),
            Command::Stop => {
                self.playing = false;
                vec![
                    Effect::Stop,
                    Effect::PlayLabel(PLAY_GLYPH),
                    Effect::Status("STOPPED".into()),
                ]
            }
            Command::Next => {
                let len = self.tracks.len();
                if len == 0 {
                    return Vec::new();
                }
                self.load((self.current + 1) % len)
            }
            Command::Prev => {
                let len = self.tracks.len();
                if len == 0 {
                    return Vec::new();
                }
                self.load((self.current + len - 1) % len)
            }
            Command::Select(index) => {
                let effects = self.load(index);
                if !effects.is_empty() {
                    self.playing = true;
                }
                effects
            }
            Command::SelectSoundFont(name) => vec![
                Effect::Status("LOADING SF2...".into()),
                Effect::LoadSoundFont {
                    url: soundfont_url(&name),
                },
            ],
            Command::Loaded => {
                self.loaded = true;
                let mut effects = Vec::new();
                if self.playing {
                    effects.push(Effect::Play);
                    effects.push(Effect::PlayLabel(PAUSE_GLYPH));
                }
                effects.push(Effect::HighlightTrack(self.current));
                effects.push(Effect::Status("PLAYING".into()));
                effects
            }
            Command::LoadFailed => vec![Effect::Status("LOAD ERROR".into())],
            Command::Dropped(name) => match classify_drop(&name) {
                Some(DroppedAsset::SoundFont) => vec![
                    Effect::Status("LOADING CUSTOM SF2...".into()),
                    Effect::LoadDroppedSoundFont,
                ],
                Some(DroppedAsset::Song) => vec![
                    Effect::Status("LOADING CUSTOM MIDI...".into()),
                    Effect::LoadDroppedSong,
                ],
                None => Vec::new(),
            },
            Command::DroppedLoaded(name) => {
                self.playing = true;
                self.loaded = true;
                let label = name.to_uppercase();
                vec![
                    Effect::Play,
                    Effect::PlayLabel(PAUSE_GLYPH),
                    Effect::Status(format!("PLAYING: {label}")),
                    Effect::TrackInfo(label),
                ]
            }
        }
    }

    fn toggle(&mut self) -> Vec<Effect> {
        if self.playing {
            self.playing = false;
            return vec![Effect::Pause, Effect::PlayLabel(PLAY_GLYPH)];
        }
        let mut effects = if self.loaded {
            vec![Effect::Play]
        } else {
            self.load(self.current)
        };
        if effects.is_empty() {
            return effects;
        }
        self.playing = true;
        effects.push(Effect::PlayLabel(PAUSE_GLYPH));
        effects
    }

    fn load(&mut self, index: usize) -> Vec<Effect> {
        let Ok(file) = self.tracks.get(index) else {
            return Vec::new();
        };
        let effects = vec![
            Effect::Status(format!("LOADING TRACK: {file}...")),
            Effect::TrackInfo(track_info(file)),
            Effect::LoadTrack {
                index,
                url: midi_url(file),
            },
        ];
        self.current = index;
        self.loaded = false;
        effects
    }
}
