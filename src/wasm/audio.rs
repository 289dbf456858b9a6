use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AnalyserNode, AudioContext, AudioContextState, CanvasRenderingContext2d, Element,
    HtmlCanvasElement, HtmlElement, OscillatorType,
};

use super::animation::{run_loop, LoopHandle};
use super::dom;
use crate::chiptune::{ScheduledNote, Sequencer, FLOOR_GAIN, PEAK_GAIN, TICK_MS};
use crate::pacing::Pacing;
use crate::player::spectrum::{layout_bars, progress_width, PROGRESS_HEIGHT, RESERVED};

pub const BUTTON_ID: &str = "music-btn";
pub const VISUALIZER_ID: &str = "visualizer";
const FFT_SIZE: u32 = 256;

#[derive(Default)]
struct Music {
    ctx: Option<AudioContext>,
    analyser: Option<AnalyserNode>,
    sequencer: Sequencer,
    timer: Option<i32>,
    visualizer: Option<LoopHandle>,
}

type Shared = Rc<RefCell<Music>>;
type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn play_note(ctx: &AudioContext, out: &AnalyserNode, note: &ScheduledNote) -> Result<(), JsValue> {
    let osc = ctx.create_oscillator()?;
    osc.set_type(OscillatorType::Square);
    osc.frequency().set_value(note.frequency);
    let gain = ctx.create_gain()?;
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(out)?;
    osc.start_with_when(note.start)?;
    gain.gain().set_value_at_time(PEAK_GAIN, note.start)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(FLOOR_GAIN, note.release_end())?;
    osc.stop_with_when(note.end())?;
    Ok(())
}

fn arm(slot: &TickSlot) -> Option<i32> {
    let w = window()?;
    let tick = slot.borrow();
    w.set_timeout_with_callback_and_timeout_and_arguments_0(tick.as_ref()?.as_ref().unchecked_ref(), TICK_MS)
        .ok()
}

/// Audio graph, created on the first click so the context is allowed to
/// start.
fn ensure_graph(music: &mut Music) -> Result<(), JsValue> {
    if music.ctx.is_some() {
        return Ok(());
    }
    let ctx = AudioContext::new()?;
    let analyser = ctx.create_analyser()?;
    analyser.set_fft_size(FFT_SIZE);
    analyser.connect_with_audio_node(&ctx.destination())?;
    if let Some(canvas) = dom::document()?.get_element_by_id(VISUALIZER_ID) {
        let canvas = canvas.dyn_into::<HtmlCanvasElement>()?;
        music.visualizer = Some(visualize(&canvas, analyser.clone(), || None)?);
    }
    log::info!("chiptune: audio graph connected");
    music.ctx = Some(ctx);
    music.analyser = Some(analyser);
    Ok(())
}

fn toggle(state: &Shared, slot: &TickSlot, button: &HtmlElement) -> Result<(), JsValue> {
    let mut music = state.borrow_mut();
    if music.sequencer.is_playing() {
        music.sequencer.toggle(0.0);
        if let (Some(w), Some(id)) = (window(), music.timer.take()) {
            w.clear_timeout_with_handle(id);
        }
    } else {
        ensure_graph(&mut music)?;
        let ctx = music.ctx.clone().ok_or("no audio context")?;
        if ctx.state() == AudioContextState::Suspended {
            ctx.resume().ok();
        }
        music.sequencer.toggle(ctx.current_time());
        drop(music);
        tick(state, slot);
        music = state.borrow_mut();
    }
    button.set_inner_text(music.sequencer.label());
    Ok(())
}

fn tick(state: &Shared, slot: &TickSlot) {
    let mut music = state.borrow_mut();
    let (Some(ctx), Some(out)) = (music.ctx.clone(), music.analyser.clone()) else {
        return;
    };
    for note in music.sequencer.schedule(ctx.current_time()) {
        if let Err(e) = play_note(&ctx, &out, &note) {
            log::error!("chiptune: note failed: {e:?}");
        }
    }
    if music.sequencer.is_playing() {
        music.timer = arm(slot);
    }
}

/// Wire the music button to the square-wave sequencer.
pub fn attach(button: &Element) -> Result<(), JsValue> {
    let button = button.clone().dyn_into::<HtmlElement>()?;
    let state: Shared = Rc::new(RefCell::new(Music::default()));
    let slot: TickSlot = Rc::new(RefCell::new(None));
    {
        let state = state.clone();
        let weak = Rc::downgrade(&slot);
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(slot) = weak.upgrade() {
                tick(&state, &slot);
            }
        }) as Box<dyn FnMut()>));
    }
    button.set_inner_text(state.borrow().sequencer.label());

    let target = button.clone();
    let click = Closure::wrap(Box::new(move || {
        if let Err(e) = toggle(&state, &slot, &target) {
            log::error!("chiptune: toggle failed: {e:?}");
        }
    }) as Box<dyn FnMut()>);
    button.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();
    Ok(())
}

fn draw_spectrum(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    bins: &[u8],
    progress: Option<f64>,
) {
    ctx.set_fill_style_str("#000");
    ctx.fill_rect(0.0, 0.0, width, height);

    if let Some(played) = progress {
        ctx.set_fill_style_str("#333");
        ctx.fill_rect(0.0, height - PROGRESS_HEIGHT, width, PROGRESS_HEIGHT);
        ctx.set_fill_style_str("#39ff14");
        ctx.fill_rect(0.0, height - PROGRESS_HEIGHT, played, PROGRESS_HEIGHT);
    }

    let gradient = ctx.create_linear_gradient(0.0, height - RESERVED, 0.0, 0.0);
    for (offset, color) in [(0.0, "#00ff00"), (0.5, "#ffff00"), (1.0, "#ff0000")] {
        gradient.add_color_stop(offset, color).ok();
    }
    ctx.set_fill_style_canvas_gradient(&gradient);
    for bar in layout_bars(bins, width, height) {
        ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);
    }
}

/// Frequency bars from `analyser`, plus the progress strip whenever
/// `progress` reports `(current, duration)`.
pub fn visualize<P>(
    canvas: &HtmlCanvasElement,
    analyser: AnalyserNode,
    progress: P,
) -> Result<LoopHandle, JsValue>
where
    P: Fn() -> Option<(f64, f64)> + 'static,
{
    let ctx = canvas
        .get_context("2d")?
        .ok_or(crate::GalleryError::NoContext("2d"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let canvas = canvas.clone();
    let mut bins = vec![0u8; analyser.frequency_bin_count() as usize];
    run_loop("visualizer", Pacing::FrameSynced, move |_dt| {
        analyser.get_byte_frequency_data(&mut bins);
        let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
        let played = progress().and_then(|(current, duration)| progress_width(current, duration, w));
        draw_spectrum(&ctx, w, h, &bins, played);
        Ok(())
    })
}
