//! Nostalgia page extras: the single-song MIDI widget and the placeholder
//! shown in place of a photo that failed to load.

pub const SONG_URL: &str = "../assets/SarahNostalgia/EDSHEERAN.mid";
pub const FALLBACK_COLOR: &str = "#555";
pub const PLACEHOLDER_HEIGHT: &str = "200px";

/// Outcome of checking that the widget's song is reachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    Found,
    Missing(u16),
    Unreachable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    Checked(Probe),
    Play,
    Stop,
}

/// Text for the widget's status line; `error` lines are shown in red.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetStatus {
    pub text: String,
    pub error: bool,
}

impl WidgetStatus {
    fn info(text: &str) -> Self {
        Self {
            text: text.into(),
            error: false,
        }
    }
}

pub fn widget_status(event: WidgetEvent) -> WidgetStatus {
    match event {
        WidgetEvent::Checked(Probe::Found) => WidgetStatus::info("MIDI Loaded! Ready to play."),
        WidgetEvent::Checked(Probe::Missing(code)) => WidgetStatus {
            text: format!(
                "MIDI file not found ({code}). Please ensure 'EDSHEERAN.mid' is in assets/SarahNostalgia."
            ),
            error: true,
        },
        WidgetEvent::Checked(Probe::Unreachable) => WidgetStatus::info("Error checking MIDI file."),
        WidgetEvent::Play => WidgetStatus::info("Playing: Ed Sheeran..."),
        WidgetEvent::Stop => WidgetStatus::info("Stopped."),
    }
}

pub fn probe_from_status(ok: bool, status: u16) -> Probe {
    if ok {
        Probe::Found
    } else {
        Probe::Missing(status)
    }
}

/// Stand-in for a broken image, built from its `alt` text and
/// `data-fallback-color`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    pub label: String,
    pub color: String,
}

impl Placeholder {
    pub fn for_image(alt: Option<&str>, color: Option<&str>) -> Self {
        Self {
            label: format!("{} (Missing)", alt.unwrap_or_default()),
            color: color
                .filter(|c| !c.is_empty())
                .unwrap_or(FALLBACK_COLOR)
                .to_string(),
        }
    }
}
