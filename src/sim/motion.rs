//! Tween-driven element motion. These hold only a clock; the animated
//! properties are pure functions of elapsed time.

use crate::easing::{
    ease_in_out_quad, ease_in_out_sine, ease_out_sine, grid_stagger_from_center, lerp, linear,
    spring, stagger, Direction, Tween,
};

use super::Simulation;

#[derive(Clone, Copy, Debug, Default)]
struct Clock {
    elapsed_ms: f64,
}

impl Clock {
    fn tick(&mut self, dt: f64) {
        self.elapsed_ms += dt * 1000.0;
    }
}

/// 5x5 grid shrinking and regrowing in a wave from the centre.
#[derive(Default)]
pub struct GridStagger {
    clock: Clock,
}

impl GridStagger {
    pub const SIDE: usize = 5;
    pub const STEP_MS: f64 = 100.0;
    const SHRINK_MS: f64 = 500.0;
    const GROW_MS: f64 = 1200.0;
    const MIN_SCALE: f64 = 0.1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> usize {
        Self::SIDE * Self::SIDE
    }

    fn delay(index: usize) -> f64 {
        grid_stagger_from_center(Self::STEP_MS, Self::SIDE, Self::SIDE, index)
    }

    /// Length of one full wave, including the longest delay.
    pub fn cycle_ms() -> f64 {
        let max_delay = (0..Self::SIDE * Self::SIDE)
            .map(Self::delay)
            .fold(0.0, f64::max);
        max_delay + Self::SHRINK_MS + Self::GROW_MS
    }

    pub fn scale(&self, index: usize) -> f64 {
        let local = self.clock.elapsed_ms % Self::cycle_ms() - Self::delay(index);
        if local < 0.0 {
            1.0
        } else if local < Self::SHRINK_MS {
            lerp(1.0, Self::MIN_SCALE, ease_out_sine(local / Self::SHRINK_MS))
        } else if local < Self::SHRINK_MS + Self::GROW_MS {
            let t = (local - Self::SHRINK_MS) / Self::GROW_MS;
            lerp(Self::MIN_SCALE, 1.0, ease_in_out_quad(t))
        } else {
            1.0
        }
    }
}

impl Simulation for GridStagger {
    fn advance(&mut self, dt: f64) {
        self.clock.tick(dt);
    }
}

/// Square turning once while morphing into a circle and fading to white.
pub struct RotatingSquare {
    clock: Clock,
    tween: Tween,
}

impl RotatingSquare {
    pub fn new() -> Self {
        Self {
            clock: Clock::default(),
            tween: Tween::new(2000.0, Direction::Alternate, ease_in_out_quad),
        }
    }

    fn progress(&self) -> f64 {
        self.tween.progress(self.clock.elapsed_ms)
    }

    pub fn turns(&self) -> f64 {
        self.progress()
    }

    pub fn border_radius_pct(&self) -> f64 {
        50.0 * self.progress()
    }

    /// Cyan at rest, white at the far end of the tween.
    pub fn color(&self) -> String {
        let red = lerp(0.0, 255.0, self.progress()).round().clamp(0.0, 255.0);
        format!("rgb({red}, 255, 255)")
    }
}

impl Default for RotatingSquare {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for RotatingSquare {
    fn advance(&mut self, dt: f64) {
        self.clock.tick(dt);
    }
}

/// A stroke drawing itself in and out along its path.
pub struct PathTrace {
    clock: Clock,
    tween: Tween,
    length: f64,
}

impl PathTrace {
    pub const PATH: &'static str = "M10 80 C 40 10, 65 10, 95 80 S 150 150, 180 80";

    pub fn new(length: f64) -> Self {
        Self {
            clock: Clock::default(),
            tween: Tween::new(1500.0, Direction::Alternate, ease_in_out_sine),
            length,
        }
    }

    pub fn dash_offset(&self) -> f64 {
        lerp(self.length, 0.0, self.tween.progress(self.clock.elapsed_ms))
    }
}

impl Simulation for PathTrace {
    fn advance(&mut self, dt: f64) {
        self.clock.tick(dt);
    }
}

/// Letters hopping one after another on a spring.
pub struct BouncingText {
    clock: Clock,
    letters: Vec<char>,
}

impl BouncingText {
    pub const TEXT: &'static str = "BOUNCE";
    pub const HEIGHT: f64 = 20.0;
    const DURATION_MS: f64 = 1000.0;
    const STEP_MS: f64 = 100.0;

    pub fn new() -> Self {
        Self {
            clock: Clock::default(),
            letters: Self::TEXT.chars().collect(),
        }
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Vertical offset of letter `index` in pixels (negative is up).
    pub fn offset(&self, index: usize) -> f64 {
        let tween = Tween::new(Self::DURATION_MS, Direction::Alternate, spring)
            .with_delay(stagger(Self::STEP_MS, index));
        -Self::HEIGHT * tween.progress(self.clock.elapsed_ms)
    }
}

impl Default for BouncingText {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for BouncingText {
    fn advance(&mut self, dt: f64) {
        self.clock.tick(dt);
    }
}

/// A dot sliding out while spinning, restarting every second.
pub struct Orbit {
    clock: Clock,
    tween: Tween,
}

impl Orbit {
    pub const REACH: f64 = 50.0;

    pub fn new() -> Self {
        Self {
            clock: Clock::default(),
            tween: Tween::new(1000.0, Direction::Loop, linear),
        }
    }

    pub fn translate_x(&self) -> f64 {
        Self::REACH * self.tween.progress(self.clock.elapsed_ms)
    }

    pub fn turns(&self) -> f64 {
        self.tween.progress(self.clock.elapsed_ms)
    }
}

impl Default for Orbit {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Orbit {
    fn advance(&mut self, dt: f64) {
        self.clock.tick(dt);
    }
}
