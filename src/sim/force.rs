use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::Rng;

use super::{frames, Bounds, Simulation};

#[derive(Clone, Copy, Debug)]
pub struct ForceNode {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

/// Small many-body layout: weak mutual attraction, a centring force and
/// collision separation, cooled by a decaying `alpha` and re-heated on a
/// fixed period.
pub struct ForceNodes {
    bounds: Bounds,
    nodes: Vec<ForceNode>,
    alpha: f64,
    since_agitate_ms: f64,
}

impl ForceNodes {
    pub const COUNT: usize = 20;
    pub const AGITATE_MS: f64 = 2000.0;
    pub const PALETTE: [&'static str; 10] = [
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
        "#bcbd22", "#17becf",
    ];
    const STRENGTH: f64 = 5.0;
    const ALPHA_MIN: f64 = 0.001;
    const ALPHA_DECAY: f64 = 0.0228;
    const VELOCITY_DECAY: f64 = 0.4;

    pub fn new(bounds: Bounds, rng: &mut SmallRng) -> Self {
        let golden = PI * (3.0 - 5f64.sqrt());
        let (cx, cy) = bounds.center();
        let nodes = (0..Self::COUNT)
            .map(|i| {
                let r = 10.0 * (0.5 + i as f64).sqrt();
                let a = i as f64 * golden;
                ForceNode {
                    x: cx + r * a.cos(),
                    y: cy + r * a.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    radius: rng.gen::<f64>() * 10.0 + 5.0,
                }
            })
            .collect();
        Self {
            bounds,
            nodes,
            alpha: 1.0,
            since_agitate_ms: 0.0,
        }
    }

    pub fn nodes(&self) -> &[ForceNode] {
        &self.nodes
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn agitate(&mut self) {
        self.alpha = 1.0;
        self.since_agitate_ms = 0.0;
    }

    fn tick(&mut self) {
        if self.alpha < Self::ALPHA_MIN {
            return;
        }
        self.alpha += (0.0 - self.alpha) * Self::ALPHA_DECAY;
        let alpha = self.alpha;
        let n = self.nodes.len();

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (a, b) = (self.nodes[i], self.nodes[j]);
                let (dx, dy) = (b.x - a.x, b.y - a.y);
                let d2 = (dx * dx + dy * dy).max(1.0);
                // positive strength pulls nodes together
                let k = Self::STRENGTH * alpha / d2;
                self.nodes[i].vx += dx * k;
                self.nodes[i].vy += dy * k;
            }
        }

        for node in &mut self.nodes {
            node.vx *= 1.0 - Self::VELOCITY_DECAY;
            node.vy *= 1.0 - Self::VELOCITY_DECAY;
            node.x += node.vx;
            node.y += node.vy;
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (self.nodes[i], self.nodes[j]);
                let (dx, dy) = (b.x - a.x, b.y - a.y);
                let min = a.radius + b.radius + 2.0;
                let d = (dx * dx + dy * dy).sqrt();
                if d >= min {
                    continue;
                }
                let (ux, uy) = if d > 1e-9 { (dx / d, dy / d) } else { (1.0, 0.0) };
                let push = (min - d) / 2.0;
                self.nodes[i].x -= ux * push;
                self.nodes[i].y -= uy * push;
                self.nodes[j].x += ux * push;
                self.nodes[j].y += uy * push;
            }
        }

        let (cx, cy) = self.bounds.center();
        let (sx, sy) = self
            .nodes
            .iter()
            .fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
        let (mx, my) = (sx / n as f64 - cx, sy / n as f64 - cy);
        for node in &mut self.nodes {
            node.x -= mx;
            node.y -= my;
        }
    }
}

impl Simulation for ForceNodes {
    fn advance(&mut self, dt: f64) {
        self.since_agitate_ms += dt * 1000.0;
        if self.since_agitate_ms >= Self::AGITATE_MS {
            self.agitate();
        }
        // the layout ticks once per reference frame
        let ticks = frames(dt).round().max(1.0) as usize;
        for _ in 0..ticks {
            self.tick();
        }
    }
}
