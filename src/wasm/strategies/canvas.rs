use std::f64::consts::TAU;

use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlElement, ImageData};

use super::super::animation::{run_loop, LoopHandle};
use super::super::dom::canvas_in;
use super::{pacing_of, Rng};
use crate::gallery::Strategy;
use crate::sim::{self, Bounds, Simulation};

fn fade(ctx: &CanvasRenderingContext2d, b: Bounds, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.fill_rect(0.0, 0.0, b.width, b.height);
}

fn dot(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64, color: &str) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, TAU)?;
    ctx.set_fill_style_str(color);
    ctx.fill();
    Ok(())
}

fn surface_bounds(canvas: &web_sys::HtmlCanvasElement) -> Bounds {
    Bounds::new(f64::from(canvas.width()), f64::from(canvas.height()))
}

pub fn retro_noise(container: &HtmlElement, rng: Rng) -> Result<LoopHandle, JsValue> {
    let (canvas, ctx) = canvas_in(container)?;
    let mut noise = sim::RetroNoise::new(canvas.width(), canvas.height(), rng);
    let s = Strategy::RetroNoise;
    run_loop(s.name(), pacing_of(s), move |dt| {
        if noise.width() == 0 || noise.height() == 0 {
            return Ok(());
        }
        noise.advance(dt);
        let rgba = noise.rgba();
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba.as_slice()), noise.width(), noise.height())?;
        ctx.put_image_data(&image, 0.0, 0.0)
    })
}

pub fn bouncing_balls(container: &HtmlElement, mut rng: Rng) -> Result<LoopHandle, JsValue> {
    let (canvas, ctx) = canvas_in(container)?;
    let bounds = surface_bounds(&canvas);
    let mut balls = sim::BouncingBalls::new(bounds, &mut rng);
    let s = Strategy::BouncingBalls;
    run_loop(s.name(), pacing_of(s), move |dt| {
        fade(&ctx, bounds, "rgba(0,0,0,0.1)");
        balls.advance(dt);
        for b in balls.balls() {
            dot(&ctx, b.x, b.y, b.radius, &b.color)?;
        }
        Ok(())
    })
}

pub fn matrix_rain(container: &HtmlElement, rng: Rng) -> Result<LoopHandle, JsValue> {
    let (canvas, ctx) = canvas_in(container)?;
    let bounds = surface_bounds(&canvas);
    let mut rain = sim::MatrixRain::new(bounds.width, rng);
    fade(&ctx, bounds, "#000");
    let s = Strategy::MatrixRain;
    run_loop(s.name(), pacing_of(s), move |dt| {
        fade(&ctx, bounds, "#0001");
        ctx.set_fill_style_str("#0f0");
        ctx.set_font("15pt monospace");
        rain.advance(dt);
        let mut buf = [0u8; 4];
        for &(x, y, glyph) in rain.drops() {
            ctx.fill_text(glyph.encode_utf8(&mut buf), x, y)?;
        }
        Ok(())
    })
}

pub fn sine_wave(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let (canvas, ctx) = canvas_in(container)?;
    let bounds = surface_bounds(&canvas);
    let mut wave = sim::SineWave::new(bounds);
    let s = Strategy::SineWave;
    run_loop(s.name(), pacing_of(s), move |dt| {
        ctx.clear_rect(0.0, 0.0, bounds.width, bounds.height);
        ctx.begin_path();
        ctx.move_to(0.0, bounds.height / 2.0);
        for (x, y) in wave.points() {
            ctx.line_to(x, y);
        }
        ctx.set_stroke_style_str("cyan");
        ctx.stroke();
        wave.advance(dt);
        Ok(())
    })
}

pub fn starfield(container: &HtmlElement, rng: Rng) -> Result<LoopHandle, JsValue> {
    let (canvas, ctx) = canvas_in(container)?;
    let bounds = surface_bounds(&canvas);
    let mut stars = sim::Starfield::new(bounds, rng);
    let s = Strategy::Starfield;
    run_loop(s.name(), pacing_of(s), move |dt| {
        fade(&ctx, bounds, "black");
        ctx.set_fill_style_str("white");
        stars.advance(dt);
        for (x, y, size) in stars.projected() {
            ctx.fill_rect(x, y, size, size);
        }
        Ok(())
    })
}

pub fn random_rects(container: &HtmlElement, rng: Rng) -> Result<LoopHandle, JsValue> {
    let (canvas, ctx) = canvas_in(container)?;
    let bounds = surface_bounds(&canvas);
    let mut rects = sim::RandomRects::new(bounds, rng);
    let s = Strategy::RandomRects;
    run_loop(s.name(), pacing_of(s), move |dt| {
        rects.advance(dt);
        if let Some(r) = rects.latest() {
            ctx.set_fill_style_str(&r.color);
            ctx.fill_rect(r.x, r.y, r.w, r.h);
        }
        fade(&ctx, bounds, "rgba(0,0,0,0.05)");
        Ok(())
    })
}

pub fn kaleidoscope(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let (canvas, ctx) = canvas_in(container)?;
    let bounds = surface_bounds(&canvas);
    let mut k = sim::Kaleidoscope::new();
    let s = Strategy::Kaleidoscope;
    run_loop(s.name(), pacing_of(s), move |dt| {
        let (cx, cy) = bounds.center();
        fade(&ctx, bounds, "rgba(0,0,0,0.1)");
        let line = k.line_color();
        let fill = k.dot_color();
        ctx.save();
        ctx.translate(cx, cy)?;
        for angle in k.arm_angles() {
            ctx.save();
            ctx.rotate(angle)?;
            ctx.begin_path();
            ctx.move_to(0.0, 0.0);
            ctx.line_to(sim::Kaleidoscope::ARM_LENGTH, 0.0);
            ctx.set_stroke_style_str(&line);
            ctx.stroke();
            dot(&ctx, sim::Kaleidoscope::DOT_DISTANCE, 0.0, 5.0, &fill)?;
            ctx.restore();
        }
        ctx.restore();
        k.advance(dt);
        Ok(())
    })
}

pub fn spiral(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let (canvas, ctx) = canvas_in(container)?;
    let bounds = surface_bounds(&canvas);
    let mut spiral = sim::Spiral::new(bounds);
    let s = Strategy::Spiral;
    run_loop(s.name(), pacing_of(s), move |dt| {
        fade(&ctx, bounds, "rgba(0,0,0,0.2)");
        let (x, y) = spiral.position();
        dot(&ctx, x, y, 5.0, "yellow")?;
        spiral.advance(dt);
        Ok(())
    })
}
