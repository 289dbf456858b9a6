use rand::rngs::SmallRng;
use rand::Rng;

use super::Simulation;

const BLACK: u32 = 0xff00_0000;
const WHITE: u32 = 0xffff_ffff;

/// Full-surface black/white static, regenerated every step.
pub struct RetroNoise {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    rng: SmallRng,
}

impl RetroNoise {
    pub fn new(width: u32, height: u32, rng: SmallRng) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; width as usize * height as usize],
            rng,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixels as RGBA bytes, ready for `ImageData`.
    pub fn rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
    }
}

impl Simulation for RetroNoise {
    fn advance(&mut self, _dt: f64) {
        for px in &mut self.pixels {
            *px = if self.rng.gen_bool(0.5) { BLACK } else { WHITE };
        }
    }
}
