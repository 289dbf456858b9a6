use rand::rngs::SmallRng;
use rand::Rng;

use super::{frames, hsl, Bounds, Simulation};

#[derive(Clone, Debug)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub color: String,
}

/// Balls moving at constant speed, reflecting off the surface edges.
pub struct BouncingBalls {
    bounds: Bounds,
    balls: Vec<Ball>,
}

impl BouncingBalls {
    pub const COUNT: usize = 10;

    pub fn new(bounds: Bounds, rng: &mut SmallRng) -> Self {
        let balls = (0..Self::COUNT)
            .map(|_| Ball {
                x: rng.gen::<f64>() * bounds.width,
                y: rng.gen::<f64>() * bounds.height,
                vx: (rng.gen::<f64>() - 0.5) * 4.0,
                vy: (rng.gen::<f64>() - 0.5) * 4.0,
                radius: 5.0 + rng.gen::<f64>() * 10.0,
                color: hsl(rng.gen::<f64>() * 360.0, 100, 50),
            })
            .collect();
        Self { bounds, balls }
    }

    pub fn with_balls(bounds: Bounds, balls: Vec<Ball>) -> Self {
        Self { bounds, balls }
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }
}

/// Reflect `pos` back into `[0, max]`, flipping `vel` when it crosses an edge.
fn reflect(pos: &mut f64, vel: &mut f64, max: f64) {
    if *pos < 0.0 {
        *pos = -*pos;
        *vel = vel.abs();
    } else if *pos > max {
        *pos = 2.0 * max - *pos;
        *vel = -vel.abs();
    }
    *pos = pos.clamp(0.0, max);
}

impl Simulation for BouncingBalls {
    fn advance(&mut self, dt: f64) {
        let f = frames(dt);
        for b in &mut self.balls {
            b.x += b.vx * f;
            b.y += b.vy * f;
            reflect(&mut b.x, &mut b.vx, self.bounds.width);
            reflect(&mut b.y, &mut b.vy, self.bounds.height);
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Stars flying towards the viewer with a simple `128 / z` projection.
pub struct Starfield {
    bounds: Bounds,
    stars: Vec<Star>,
    rng: SmallRng,
}

impl Starfield {
    pub const COUNT: usize = 100;
    const SPEED: f64 = 2.0;
    const FOCAL: f64 = 128.0;

    pub fn new(bounds: Bounds, mut rng: SmallRng) -> Self {
        let stars = (0..Self::COUNT)
            .map(|_| Star {
                x: rng.gen::<f64>() * bounds.width,
                y: rng.gen::<f64>() * bounds.height,
                z: rng.gen::<f64>() * bounds.width,
            })
            .collect();
        Self { bounds, stars, rng }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Screen position and size of every star currently inside the surface.
    pub fn projected(&self) -> Vec<(f64, f64, f64)> {
        let (cx, cy) = self.bounds.center();
        self.stars
            .iter()
            .filter(|s| s.z > 0.0)
            .filter_map(|s| {
                let k = Self::FOCAL / s.z;
                let px = (s.x - cx) * k + cx;
                let py = (s.y - cy) * k + cy;
                if !self.bounds.contains(px, py) {
                    return None;
                }
                let size = (1.0 - s.z / self.bounds.width) * 3.0;
                Some((px, py, size.max(0.0)))
            })
            .collect()
    }
}

impl Simulation for Starfield {
    fn advance(&mut self, dt: f64) {
        let step = Self::SPEED * frames(dt);
        let Bounds { width, height } = self.bounds;
        for s in &mut self.stars {
            s.z -= step;
            if s.z <= 0.0 {
                s.z = width;
                s.x = self.rng.gen::<f64>() * width;
                s.y = self.rng.gen::<f64>() * height;
            }
        }
    }
}
