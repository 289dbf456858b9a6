use rand::rngs::SmallRng;
use rand::Rng;

use super::Simulation;

/// Falling glyph columns. Advances one row per tick regardless of `dt`.
pub struct MatrixRain {
    cursors: Vec<f64>,
    drops: Vec<(f64, f64, char)>,
    rng: SmallRng,
}

impl MatrixRain {
    pub const PITCH: f64 = 20.0;

    pub fn new(width: f64, rng: SmallRng) -> Self {
        let cols = (width.max(0.0) / Self::PITCH).floor() as usize + 1;
        Self {
            cursors: vec![0.0; cols],
            drops: Vec::with_capacity(cols),
            rng,
        }
    }

    pub fn columns(&self) -> usize {
        self.cursors.len()
    }

    pub fn cursors(&self) -> &[f64] {
        &self.cursors
    }

    /// Glyphs emitted by the last step, as `(x, y, glyph)`.
    pub fn drops(&self) -> &[(f64, f64, char)] {
        &self.drops
    }
}

impl Simulation for MatrixRain {
    fn advance(&mut self, _dt: f64) {
        self.drops.clear();
        for (index, y) in self.cursors.iter_mut().enumerate() {
            let glyph = char::from(self.rng.gen_range(33u8..127));
            self.drops.push((index as f64 * Self::PITCH, *y, glyph));
            let limit = 100.0 + self.rng.gen::<f64>() * 10_000.0;
            *y = if *y > limit { 0.0 } else { *y + Self::PITCH };
        }
    }
}

/// A short string of random symbols, replaced on every tick.
pub struct TextScramble {
    text: String,
    rng: SmallRng,
}

impl TextScramble {
    pub const GLYPHS: &'static str = "!@#$%^&*()_+{}|:<>?";
    pub const LEN: usize = 8;

    pub fn new(rng: SmallRng) -> Self {
        Self {
            text: String::new(),
            rng,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Simulation for TextScramble {
    fn advance(&mut self, _dt: f64) {
        let glyphs = Self::GLYPHS.as_bytes();
        self.text = (0..Self::LEN)
            .map(|_| char::from(glyphs[self.rng.gen_range(0..glyphs.len())]))
            .collect();
    }
}
