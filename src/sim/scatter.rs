use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::Rng;

use super::{Bounds, Simulation};
use crate::easing::{ease_in_out_quad, lerp};

#[derive(Clone, Debug)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: String,
}

/// One translucent random rectangle per tick over a fading background.
pub struct RandomRects {
    bounds: Bounds,
    latest: Option<Rect>,
    rng: SmallRng,
}

impl RandomRects {
    pub const MAX_SIZE: f64 = 50.0;

    pub fn new(bounds: Bounds, rng: SmallRng) -> Self {
        Self {
            bounds,
            latest: None,
            rng,
        }
    }

    pub fn latest(&self) -> Option<&Rect> {
        self.latest.as_ref()
    }
}

impl Simulation for RandomRects {
    fn advance(&mut self, _dt: f64) {
        let r = &mut self.rng;
        let (red, green, blue) = (r.gen_range(0..=255u8), r.gen_range(0..=255u8), r.gen_range(0..=255u8));
        self.latest = Some(Rect {
            x: r.gen::<f64>() * self.bounds.width,
            y: r.gen::<f64>() * self.bounds.height,
            w: r.gen::<f64>() * Self::MAX_SIZE,
            h: r.gen::<f64>() * Self::MAX_SIZE,
            color: format!("rgba({red},{green},{blue},0.5)"),
        });
    }
}

/// A random point cloud with a few random links, regenerated each tick.
pub struct ScatterLinks {
    bounds: Bounds,
    points: Vec<(f64, f64)>,
    links: Vec<(usize, usize)>,
    rng: SmallRng,
}

impl ScatterLinks {
    pub const POINTS: usize = 50;
    pub const LINKS: usize = 20;

    pub fn new(bounds: Bounds, rng: SmallRng) -> Self {
        let mut s = Self {
            bounds,
            points: Vec::new(),
            links: Vec::new(),
            rng,
        };
        s.advance(0.0);
        s
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn links(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.links
            .iter()
            .map(|&(a, b)| (self.points[a], self.points[b]))
    }
}

impl Simulation for ScatterLinks {
    fn advance(&mut self, _dt: f64) {
        let Bounds { width, height } = self.bounds;
        let r = &mut self.rng;
        self.points = (0..Self::POINTS)
            .map(|_| (r.gen::<f64>() * width, r.gen::<f64>() * height))
            .collect();
        self.links = (0..Self::LINKS)
            .map(|_| (r.gen_range(0..Self::POINTS), r.gen_range(0..Self::POINTS)))
            .collect();
    }
}

/// Bar chart tweening towards a fresh random data set every period.
pub struct RandomBars {
    bounds: Bounds,
    from: Vec<f64>,
    to: Vec<f64>,
    elapsed_ms: f64,
    rng: SmallRng,
}

impl RandomBars {
    pub const COUNT: usize = 20;
    pub const RETARGET_MS: f64 = 1500.0;
    pub const TWEEN_MS: f64 = 1000.0;
    const SCALE: f64 = 1.5;

    pub fn new(bounds: Bounds, mut rng: SmallRng) -> Self {
        let from = Self::sample(&mut rng);
        let to = Self::sample(&mut rng);
        Self {
            bounds,
            from,
            to,
            elapsed_ms: 0.0,
            rng,
        }
    }

    fn sample(rng: &mut SmallRng) -> Vec<f64> {
        (0..Self::COUNT).map(|_| rng.gen::<f64>() * 100.0).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        let t = ease_in_out_quad((self.elapsed_ms / Self::TWEEN_MS).min(1.0));
        self.from
            .iter()
            .zip(&self.to)
            .map(|(&a, &b)| lerp(a, b, t))
            .collect()
    }

    /// `(x, y, width, height, fill)` per bar.
    pub fn bars(&self) -> Vec<(f64, f64, f64, f64, &'static str)> {
        let slot = self.bounds.width / Self::COUNT as f64;
        self.values()
            .into_iter()
            .zip(&self.to)
            .enumerate()
            .map(|(i, (v, &target))| {
                let h = v * Self::SCALE;
                let fill = if target > 50.0 { "orange" } else { "purple" };
                (i as f64 * slot, self.bounds.height - h, (slot - 2.0).max(0.0), h, fill)
            })
            .collect()
    }
}

impl Simulation for RandomBars {
    fn advance(&mut self, dt: f64) {
        self.elapsed_ms += dt * 1000.0;
        if self.elapsed_ms >= Self::RETARGET_MS {
            self.from = self.values();
            self.to = Self::sample(&mut self.rng);
            self.elapsed_ms %= Self::RETARGET_MS;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
    pub start: f64,
    pub end: f64,
}

impl Slice {
    /// SVG path of this slice for a pie centred on the origin. Angles run
    /// clockwise from twelve o'clock.
    pub fn path(&self, radius: f64) -> String {
        let point = |a: f64| (radius * a.sin(), -radius * a.cos());
        let (x0, y0) = point(self.start);
        let (x1, y1) = point(self.end);
        let large = u8::from(self.end - self.start > TAU / 2.0);
        format!("M0,0L{x0:.3},{y0:.3}A{radius},{radius},0,{large},1,{x1:.3},{y1:.3}Z")
    }
}

/// Four-slice pie with random proportions and a pulsing scale.
pub struct PiePulse {
    slices: Vec<Slice>,
    scale: f64,
    rng: SmallRng,
}

impl PiePulse {
    pub const COLORS: [&'static str; 4] = ["red", "blue", "yellow", "green"];
    pub const RADIUS: f64 = 50.0;

    pub fn new(rng: SmallRng) -> Self {
        let mut s = Self {
            slices: Vec::new(),
            scale: 1.0,
            rng,
        };
        s.advance(0.0);
        s
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Lay out `values` as consecutive slices covering the full turn.
    pub fn layout(values: &[f64]) -> Vec<Slice> {
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return Vec::new();
        }
        let mut start = 0.0;
        values
            .iter()
            .map(|v| {
                let end = start + v / total * TAU;
                let s = Slice { start, end };
                start = end;
                s
            })
            .collect()
    }
}

impl Simulation for PiePulse {
    fn advance(&mut self, _dt: f64) {
        let values: Vec<f64> = (0..Self::COLORS.len()).map(|_| self.rng.gen::<f64>()).collect();
        self.slices = Self::layout(&values);
        self.scale = 0.8 + self.rng.gen::<f64>() * 0.4;
    }
}
