use std::f64::consts::{PI, TAU};

use super::{frames, hsl, Bounds, Simulation};

/// Travelling sine wave across the surface.
pub struct SineWave {
    bounds: Bounds,
    offset: f64,
}

impl SineWave {
    pub const AMPLITUDE: f64 = 50.0;
    const K: f64 = 0.05;
    const SPEED: f64 = 0.1;

    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            offset: 0.0,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// One point per horizontal pixel.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let mid = self.bounds.height / 2.0;
        (0..self.bounds.width as usize).map(move |i| {
            let x = i as f64;
            (x, mid + (x * Self::K + self.offset).sin() * Self::AMPLITUDE)
        })
    }
}

impl Simulation for SineWave {
    fn advance(&mut self, dt: f64) {
        self.offset = (self.offset + Self::SPEED * frames(dt)) % TAU;
    }
}

/// Six rotating arms with a hue that drifts with the rotation.
pub struct Kaleidoscope {
    angle: f64,
}

impl Kaleidoscope {
    pub const ARMS: usize = 6;
    pub const ARM_LENGTH: f64 = 50.0;
    pub const DOT_DISTANCE: f64 = 60.0;
    const SPEED: f64 = 0.05;

    pub fn new() -> Self {
        Self { angle: 0.0 }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Rotation of each arm around the centre.
    pub fn arm_angles(&self) -> impl Iterator<Item = f64> + '_ {
        (1..=Self::ARMS).map(move |i| self.angle + i as f64 * PI / 3.0)
    }

    pub fn line_color(&self) -> String {
        hsl(self.angle * 50.0, 100, 50)
    }

    pub fn dot_color(&self) -> String {
        hsl(self.angle * 50.0 + 180.0, 100, 50)
    }
}

impl Default for Kaleidoscope {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Kaleidoscope {
    fn advance(&mut self, dt: f64) {
        self.angle += Self::SPEED * frames(dt);
    }
}

/// A dot tracing an Archimedean spiral out from the centre, then restarting.
pub struct Spiral {
    bounds: Bounds,
    t: f64,
}

impl Spiral {
    pub const T_MAX: f64 = 50.0;
    const SPEED: f64 = 0.1;

    pub fn new(bounds: Bounds) -> Self {
        Self { bounds, t: 0.0 }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn position(&self) -> (f64, f64) {
        let (cx, cy) = self.bounds.center();
        let r = self.t * 2.0;
        (cx + self.t.cos() * r, cy + self.t.sin() * r)
    }
}

impl Simulation for Spiral {
    fn advance(&mut self, dt: f64) {
        self.t += Self::SPEED * frames(dt);
        if self.t > Self::T_MAX {
            self.t = 0.0;
        }
    }
}

/// Circles orbiting the centre with a pulsing radius.
pub struct Orbiters {
    bounds: Bounds,
    t: f64,
}

impl Orbiters {
    pub const COUNT: usize = 10;
    pub const RADIUS: f64 = 50.0;
    const SPEED: f64 = 0.05;

    pub fn new(bounds: Bounds) -> Self {
        Self { bounds, t: 0.0 }
    }

    /// `(cx, cy, r)` of every circle.
    pub fn circles(&self) -> Vec<(f64, f64, f64)> {
        let (cx, cy) = self.bounds.center();
        (0..Self::COUNT)
            .map(|i| {
                let phase = self.t + i as f64;
                (
                    cx + phase.cos() * Self::RADIUS,
                    cy + phase.sin() * Self::RADIUS,
                    10.0 + (self.t * 2.0 + i as f64).sin() * 5.0,
                )
            })
            .collect()
    }
}

impl Simulation for Orbiters {
    fn advance(&mut self, dt: f64) {
        self.t += Self::SPEED * frames(dt);
    }
}
