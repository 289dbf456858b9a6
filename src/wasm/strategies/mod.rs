//! Browser side of the render strategies: each builds its surface inside the
//! container and hands its simulation to a paced loop.

mod canvas;
mod motion;
mod svg;

use rand::rngs::SmallRng;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use super::animation::LoopHandle;
use crate::gallery::Strategy;
use crate::pacing::Pacing;

pub fn render(strategy: Strategy, container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    log::debug!("render {}", strategy.name());
    let rng = crate::sim::rng(seed());
    use Strategy::*;
    match strategy {
        RetroNoise => canvas::retro_noise(container, rng),
        BouncingBalls => canvas::bouncing_balls(container, rng),
        MatrixRain => canvas::matrix_rain(container, rng),
        SineWave => canvas::sine_wave(container),
        Starfield => canvas::starfield(container, rng),
        RandomRects => canvas::random_rects(container, rng),
        Kaleidoscope => canvas::kaleidoscope(container),
        Spiral => canvas::spiral(container),
        RandomBars => svg::random_bars(container, rng),
        ForceNodes => svg::force_nodes(container, rng),
        Circles => svg::circles(container),
        VoronoiIsh => svg::voronoi_ish(container, rng),
        PiePulse => svg::pie_pulse(container, rng),
        PathTrace => svg::path_trace(container),
        CursorTracker => motion::cursor_tracker(container),
        TextScramble => motion::text_scramble(container, rng),
        GridStagger => motion::grid_stagger(container),
        RotatingSquare => motion::rotating_square(container),
        BouncingText => motion::bouncing_text(container),
        Orbit => motion::orbit(container),
    }
}

/// Per-render seed mixed from `Math.random` and the wall clock.
pub(crate) fn seed() -> u64 {
    let random = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    random ^ (js_sys::Date::now() as u64).rotate_left(32)
}

pub(crate) fn pacing_of(strategy: Strategy) -> Pacing {
    strategy.pacing().unwrap_or(Pacing::FrameSynced)
}

type Rng = SmallRng;
