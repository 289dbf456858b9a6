//! Per-strategy simulations. Each one owns its entities and advances with
//! `advance(dt)`; drawing lives in the browser glue.

mod curves;
mod force;
mod glyphs;
mod motion;
mod noise;
mod particles;
mod scatter;

pub use curves::{Kaleidoscope, Orbiters, SineWave, Spiral};
pub use force::{ForceNode, ForceNodes};
pub use glyphs::{MatrixRain, TextScramble};
pub use motion::{BouncingText, GridStagger, Orbit, PathTrace, RotatingSquare};
pub use noise::RetroNoise;
pub use particles::{Ball, BouncingBalls, Star, Starfield};
pub use scatter::{PiePulse, RandomBars, RandomRects, Rect, ScatterLinks, Slice};

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Seconds per reference frame. Per-frame constants are scaled by
/// `dt / FRAME` so motion speed does not depend on refresh rate.
pub const FRAME: f64 = 1.0 / 60.0;

/// Extent of a drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

pub trait Simulation {
    fn advance(&mut self, dt: f64);
}

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

pub(crate) fn frames(dt: f64) -> f64 {
    dt / FRAME
}

pub fn hsl(hue: f64, saturation: u8, lightness: u8) -> String {
    format!("hsl({:.1}, {saturation}%, {lightness}%)", hue.rem_euclid(360.0))
}
