//! Ordered, read-only list of gallery entries.

use crate::pacing::Pacing;

/// What a strategy draws into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Canvas,
    Svg,
    Dom,
}

/// The built-in render strategies, in gallery order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    RetroNoise,
    BouncingBalls,
    MatrixRain,
    SineWave,
    Starfield,
    RandomRects,
    CursorTracker,
    TextScramble,
    Kaleidoscope,
    Spiral,
    RandomBars,
    ForceNodes,
    Circles,
    VoronoiIsh,
    PiePulse,
    GridStagger,
    RotatingSquare,
    PathTrace,
    BouncingText,
    Orbit,
}

impl Strategy {
    pub const ALL: [Strategy; 20] = [
        Strategy::RetroNoise,
        Strategy::BouncingBalls,
        Strategy::MatrixRain,
        Strategy::SineWave,
        Strategy::Starfield,
        Strategy::RandomRects,
        Strategy::CursorTracker,
        Strategy::TextScramble,
        Strategy::Kaleidoscope,
        Strategy::Spiral,
        Strategy::RandomBars,
        Strategy::ForceNodes,
        Strategy::Circles,
        Strategy::VoronoiIsh,
        Strategy::PiePulse,
        Strategy::GridStagger,
        Strategy::RotatingSquare,
        Strategy::PathTrace,
        Strategy::BouncingText,
        Strategy::Orbit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::RetroNoise => "1. Retro Noise",
            Strategy::BouncingBalls => "2. Bouncing Balls",
            Strategy::MatrixRain => "3. Matrix Rain",
            Strategy::SineWave => "4. Sine Wave",
            Strategy::Starfield => "5. Starfield",
            Strategy::RandomRects => "6. Random Rects",
            Strategy::CursorTracker => "7. Cursor Tracker",
            Strategy::TextScramble => "8. Text Scramble",
            Strategy::Kaleidoscope => "9. Kaleidoscope",
            Strategy::Spiral => "10. Spiral",
            Strategy::RandomBars => "11. Random Bars",
            Strategy::ForceNodes => "12. Force Nodes",
            Strategy::Circles => "13. Circles",
            Strategy::VoronoiIsh => "14. Voronoi-ish",
            Strategy::PiePulse => "15. Pie Pulse",
            Strategy::GridStagger => "16. Grid Stagger",
            Strategy::RotatingSquare => "17. Rotating Squares",
            Strategy::PathTrace => "18. Path Trace",
            Strategy::BouncingText => "19. Bouncing Text",
            Strategy::Orbit => "20. Orbit",
        }
    }

    pub fn surface(self) -> Surface {
        use Strategy::*;
        match self {
            RetroNoise | BouncingBalls | MatrixRain | SineWave | Starfield | RandomRects
            | Kaleidoscope | Spiral => Surface::Canvas,
            RandomBars | ForceNodes | Circles | VoronoiIsh | PiePulse | PathTrace => Surface::Svg,
            CursorTracker | TextScramble | GridStagger | RotatingSquare | BouncingText | Orbit => {
                Surface::Dom
            }
        }
    }

    /// How the strategy's loop is driven. The cursor tracker is purely
    /// event driven and reports `None`.
    pub fn pacing(self) -> Option<Pacing> {
        use Strategy::*;
        match self {
            CursorTracker => None,
            MatrixRain => Some(Pacing::Timer { period_ms: 50 }),
            RandomRects | TextScramble => Some(Pacing::Timer { period_ms: 100 }),
            VoronoiIsh => Some(Pacing::Timer { period_ms: 1000 }),
            PiePulse => Some(Pacing::Timer { period_ms: 500 }),
            _ => Some(Pacing::FrameSynced),
        }
    }
}

/// A named render entry point.
#[derive(Clone, Debug)]
pub struct Descriptor<R> {
    pub name: String,
    pub render: R,
}

impl<R> Descriptor<R> {
    pub fn new(name: impl Into<String>, render: R) -> Self {
        Self {
            name: name.into(),
            render,
        }
    }
}

/// Fixed sequence of descriptors. Names are not validated and may repeat.
#[derive(Clone, Debug)]
pub struct Registry<R> {
    entries: Vec<Descriptor<R>>,
}

impl<R> Registry<R> {
    pub fn new(entries: Vec<Descriptor<R>>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Descriptor<R>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Descriptor<R>> {
        self.entries.iter()
    }
}

impl Registry<Strategy> {
    /// The built-in twenty.
    pub fn standard() -> Self {
        Self::new(
            Strategy::ALL
                .iter()
                .map(|&s| Descriptor::new(s.name(), s))
                .collect(),
        )
    }
}

impl<'a, R> IntoIterator for &'a Registry<R> {
    type Item = &'a Descriptor<R>;
    type IntoIter = std::slice::Iter<'a, Descriptor<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
