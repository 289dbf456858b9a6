//! Cursor-following eyes: pupil geometry and the background eye field.

use rand::rngs::SmallRng;
use rand::Rng;

/// Pupil offset for the gallery's two-eye tracker.
pub const TRACKER_PUPIL_RADIUS: f64 = 5.0;
/// Pupil offset for the full-page eye field.
pub const FIELD_PUPIL_RADIUS: f64 = 8.0;
/// Grid pitch of the eye field.
pub const EYE_SPACING: f64 = 60.0;
/// Quiet period after the last resize before the field is rebuilt.
pub const RESIZE_DEBOUNCE_MS: i32 = 200;

const SKIP_PROBABILITY: f64 = 0.3;
const INSET: f64 = 10.0;
const JITTER: f64 = 10.0;

/// Translation that points a pupil at `pointer` from an eye centred at
/// `eye`, `radius` pixels from the centre.
pub fn pupil_offset(eye: (f64, f64), pointer: (f64, f64), radius: f64) -> (f64, f64) {
    let angle = (pointer.1 - eye.1).atan2(pointer.0 - eye.0);
    (angle.cos() * radius, angle.sin() * radius)
}

pub fn pupil_transform(offset: (f64, f64)) -> String {
    format!("translate({:.2}px, {:.2}px)", offset.0, offset.1)
}

/// Top-left positions of a loosely gridded field of eyes covering a viewport.
#[derive(Clone, Debug, Default)]
pub struct EyeField {
    positions: Vec<(f64, f64)>,
}

impl EyeField {
    pub fn generate(width: f64, height: f64, rng: &mut SmallRng) -> Self {
        let cols = (width.max(0.0) / EYE_SPACING).ceil() as usize;
        let rows = (height.max(0.0) / EYE_SPACING).ceil() as usize;
        let mut positions = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                if rng.gen_bool(SKIP_PROBABILITY) {
                    continue;
                }
                let dx = rng.gen_range(-JITTER..JITTER);
                let dy = rng.gen_range(-JITTER..JITTER);
                positions.push((
                    c as f64 * EYE_SPACING + INSET + dx,
                    r as f64 * EYE_SPACING + INSET + dy,
                ));
            }
        }
        Self { positions }
    }

    pub fn positions(&self) -> &[(f64, f64)] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Upper bound on the number of eyes for a viewport.
    pub fn capacity(width: f64, height: f64) -> usize {
        let cols = (width.max(0.0) / EYE_SPACING).ceil() as usize;
        let rows = (height.max(0.0) / EYE_SPACING).ceil() as usize;
        cols * rows
    }
}
