//! Easing curves and looping tweens for the DOM/SVG motion strategies.

use std::f64::consts::PI;

pub type Easing = fn(f64) -> f64;

pub fn linear(t: f64) -> f64 {
    t
}

pub fn ease_out_sine(t: f64) -> f64 {
    (t * PI / 2.0).sin()
}

pub fn ease_in_out_sine(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Damped spring settling at 1. Overshoots once or twice, then rests.
pub fn spring(t: f64) -> f64 {
    const STIFFNESS: f64 = 80.0;
    const DAMPING: f64 = 10.0;
    const MASS: f64 = 1.0;
    let w0 = (STIFFNESS / MASS).sqrt();
    let zeta = DAMPING / (2.0 * (STIFFNESS * MASS).sqrt());
    // animation length is normalised, the spring settles in ~1.5 s of sim time
    let s = t * 1.5;
    if zeta < 1.0 {
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        1.0 - (-zeta * w0 * s).exp() * ((wd * s).cos() + (zeta * w0 / wd) * (wd * s).sin())
    } else {
        1.0 - (1.0 + w0 * s) * (-w0 * s).exp()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Restart from the beginning each cycle.
    Loop,
    /// Play forwards, then backwards.
    Alternate,
}

/// A repeating animation of fixed duration.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub direction: Direction,
    pub easing: Easing,
}

impl Tween {
    pub fn new(duration_ms: f64, direction: Direction, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
            direction,
            easing,
        }
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Eased progress in `[0, 1]` (springs may overshoot) at `elapsed_ms`.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let local = elapsed_ms - self.delay_ms;
        if local <= 0.0 || self.duration_ms <= 0.0 {
            return (self.easing)(0.0);
        }
        let cycles = local / self.duration_ms;
        let phase = cycles.fract();
        let raw = match self.direction {
            Direction::Loop => phase,
            Direction::Alternate if (cycles as u64) % 2 == 1 => 1.0 - phase,
            Direction::Alternate => phase,
        };
        (self.easing)(raw)
    }
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Delay for element `index` of a linear stagger.
pub fn stagger(step_ms: f64, index: usize) -> f64 {
    step_ms * index as f64
}

/// Delay for cell `index` of a `cols x rows` grid staggered outward from the
/// centre.
pub fn grid_stagger_from_center(step_ms: f64, cols: usize, rows: usize, index: usize) -> f64 {
    let cx = (cols as f64 - 1.0) / 2.0;
    let cy = (rows as f64 - 1.0) / 2.0;
    let x = (index % cols) as f64;
    let y = (index / cols) as f64;
    step_ms * ((x - cx).powi(2) + (y - cy).powi(2)).sqrt()
}
