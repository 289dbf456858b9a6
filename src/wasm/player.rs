//! Browser controller for the MIDI player page. The synthesizer and
//! sequencer are objects owned by the hosting page's synth library; they are
//! driven here through dynamic property access only.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Promise, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::{
    window, AnalyserNode, CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlOptionElement,
    HtmlSelectElement, Response,
};

use super::animation::{run_loop, LoopHandle};
use super::{audio, dom};
use crate::pacing::Pacing;
use crate::player::notes::{download_status, time_label, track_ended, NoteRain};
use crate::player::{
    option_label, Command, Effect, FileList, PlayerSession, MIDI_INDEX, SOUNDFONT_INDEX,
};
use crate::sim::Simulation;

const NOTE_EVENT: &str = "noteOn";
const NOTE_LISTENER_ID: &str = "vis-note-on";

struct Ui {
    status: Option<HtmlElement>,
    track_info: Option<HtmlElement>,
    play: Option<HtmlElement>,
    time: Option<HtmlElement>,
    tracks: Option<HtmlSelectElement>,
    soundfonts: Option<HtmlSelectElement>,
}

impl Ui {
    fn lookup() -> Result<Self, JsValue> {
        let doc = dom::document()?;
        let html = |id: &str| doc.get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let select = |id: &str| doc.get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlSelectElement>().ok());
        Ok(Self {
            status: html("status-bar"),
            track_info: html("track-info"),
            play: html("btn-play"),
            time: html("time-display"),
            tracks: select("track-select"),
            soundfonts: select("sf-select"),
        })
    }

    fn status(&self, text: &str) {
        if let Some(el) = &self.status {
            el.set_text_content(Some(text));
        }
    }
}

struct Inner {
    session: PlayerSession,
    synth: JsValue,
    sequencer: JsValue,
    ui: Ui,
    dropped: Option<(String, Uint8Array)>,
    visualizer: Option<LoopHandle>,
    notes: Option<LoopHandle>,
    note_on: Option<Closure<dyn FnMut(JsValue)>>,
}

type Shared = Rc<RefCell<Inner>>;

fn method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let f = Reflect::get(target, &JsValue::from_str(name))?.dyn_into::<Function>()?;
    f.apply(target, &args.iter().collect::<Array>())
}

async fn settle(value: JsValue) -> Result<JsValue, JsValue> {
    match value.dyn_into::<Promise>() {
        Ok(p) => JsFuture::from(p).await,
        Err(v) => Ok(v),
    }
}

async fn fetch(url: &str) -> Result<Response, JsValue> {
    let win = window().ok_or("no window")?;
    let resp = JsFuture::from(win.fetch_with_str(url)).await?.dyn_into::<Response>()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("{url}: HTTP {}", resp.status())));
    }
    Ok(resp)
}

async fn fetch_list(url: &str) -> Result<FileList, JsValue> {
    let text = JsFuture::from(fetch(url).await?.text()?).await?;
    Ok(FileList::from_json(&text.as_string().unwrap_or_default())?)
}

async fn fetch_bytes(url: &str) -> Result<Uint8Array, JsValue> {
    let buffer = JsFuture::from(fetch(url).await?.array_buffer()?).await?;
    Ok(Uint8Array::new(&buffer))
}

/// Like `fetch_bytes`, reading the body stream chunk by chunk so the status
/// line can show download progress.
async fn fetch_bytes_reporting(url: &str, report: impl Fn(&str)) -> Result<Uint8Array, JsValue> {
    let resp = fetch(url).await?;
    let total = Reflect::get(&resp, &"headers".into())
        .and_then(|h| method(&h, "get", &["content-length".into()]))
        .ok()
        .and_then(|v| v.as_string())
        .and_then(|v| v.parse::<u64>().ok());
    let body = Reflect::get(&resp, &"body".into())?;
    if body.is_null() || body.is_undefined() {
        let buffer = JsFuture::from(resp.array_buffer()?).await?;
        return Ok(Uint8Array::new(&buffer));
    }
    let reader = method(&body, "getReader", &[])?;
    let mut bytes = Vec::new();
    loop {
        let chunk = settle(method(&reader, "read", &[])?).await?;
        if Reflect::get(&chunk, &"done".into())?.is_truthy() {
            break;
        }
        let value = Reflect::get(&chunk, &"value".into())?.dyn_into::<Uint8Array>()?;
        bytes.extend(value.to_vec());
        if let Some(status) = download_status(bytes.len() as u64, total) {
            report(&status);
        }
    }
    report("BUILDING BUFFER...");
    Ok(Uint8Array::from(bytes.as_slice()))
}

fn fill_select(select: &HtmlSelectElement, items: impl Iterator<Item = (String, String)>) -> Result<(), JsValue> {
    let doc = dom::document()?;
    dom::clear_children(select);
    for (value, label) in items {
        let opt = doc.create_element("option")?.dyn_into::<HtmlOptionElement>()?;
        opt.set_value(&value);
        opt.set_text(&label);
        select.append_child(&opt)?;
    }
    Ok(())
}

async fn load_song(sequencer: &JsValue, bytes: Uint8Array) -> Result<(), JsValue> {
    let list = Array::of1(&bytes);
    settle(method(sequencer, "loadNewSongList", &[list.into()])?).await?;
    Reflect::set(sequencer, &"currentTime".into(), &JsValue::from_f64(0.0))?;
    Ok(())
}

async fn add_sound_bank(synth: &JsValue, bytes: Uint8Array, name: &str) -> Result<(), JsValue> {
    let manager = Reflect::get(synth, &"soundBankManager".into())?;
    settle(method(&manager, "addSoundBank", &[bytes.buffer().into(), name.into()])?).await?;
    Ok(())
}

fn apply(shared: &Shared, command: Command) {
    let effects = shared.borrow_mut().session.apply(command);
    for effect in effects {
        if let Err(e) = perform(shared, effect) {
            log::error!("player: {e:?}");
            shared.borrow().ui.status("ERROR");
        }
    }
}

fn perform(shared: &Shared, effect: Effect) -> Result<(), JsValue> {
    let inner = shared.borrow();
    match effect {
        Effect::Status(text) => inner.ui.status(&text),
        Effect::PlayLabel(label) => {
            if let Some(b) = &inner.ui.play {
                b.set_text_content(Some(label));
            }
        }
        Effect::TrackInfo(text) => {
            if let Some(el) = &inner.ui.track_info {
                el.set_text_content(Some(&text));
            }
        }
        Effect::HighlightTrack(index) => {
            if let Some(select) = &inner.ui.tracks {
                select.set_value(&index.to_string());
            }
        }
        Effect::Play => {
            method(&inner.sequencer, "play", &[])?;
        }
        Effect::Pause => {
            method(&inner.sequencer, "pause", &[])?;
        }
        Effect::Stop => {
            Reflect::set(&inner.sequencer, &"currentTime".into(), &JsValue::from_f64(0.0))?;
            method(&inner.sequencer, "stop", &[])?;
        }
        Effect::LoadTrack { url, .. } => {
            let shared = shared.clone();
            let sequencer = inner.sequencer.clone();
            spawn_local(async move {
                let loaded = match fetch_bytes(&url).await {
                    Ok(bytes) => load_song(&sequencer, bytes).await,
                    Err(e) => Err(e),
                };
                match loaded {
                    Ok(()) => apply(&shared, Command::Loaded),
                    Err(e) => {
                        log::error!("player: {url}: {e:?}");
                        apply(&shared, Command::LoadFailed);
                    }
                }
            });
        }
        Effect::LoadSoundFont { url } => {
            let shared = shared.clone();
            let synth = inner.synth.clone();
            spawn_local(async move {
                let report = |text: &str| shared.borrow().ui.status(text);
                let loaded = match fetch_bytes_reporting(&url, report).await {
                    Ok(bytes) => add_sound_bank(&synth, bytes, &url).await,
                    Err(e) => Err(e),
                };
                let status = match loaded {
                    Ok(()) => "SF2 LOADED",
                    Err(e) => {
                        log::error!("player: SF2 load error: {e:?}");
                        "SF2 ERROR"
                    }
                };
                shared.borrow().ui.status(status);
            });
        }
        Effect::LoadDroppedSong => {
            let Some((name, bytes)) = inner.dropped.clone() else {
                return Ok(());
            };
            let shared = shared.clone();
            let sequencer = inner.sequencer.clone();
            spawn_local(async move {
                match load_song(&sequencer, bytes).await {
                    Ok(()) => apply(&shared, Command::DroppedLoaded(name)),
                    Err(e) => {
                        log::error!("player: dropped song {name}: {e:?}");
                        apply(&shared, Command::LoadFailed);
                    }
                }
            });
        }
        Effect::LoadDroppedSoundFont => {
            let Some((name, bytes)) = inner.dropped.clone() else {
                return Ok(());
            };
            let shared = shared.clone();
            let synth = inner.synth.clone();
            spawn_local(async move {
                let status = match add_sound_bank(&synth, bytes, &name).await {
                    Ok(()) => "CUSTOM SF2 LOADED",
                    Err(_) => "SF2 ERROR",
                };
                shared.borrow().ui.status(status);
            });
        }
    }
    Ok(())
}

async fn load_lists(shared: &Shared) -> Result<(), JsValue> {
    shared.borrow().ui.status("LOADING ASSETS...");
    let tracks = fetch_list(MIDI_INDEX).await?;
    let soundfonts = fetch_list(SOUNDFONT_INDEX).await?;
    {
        let mut inner = shared.borrow_mut();
        if let Some(select) = &inner.ui.tracks {
            fill_select(
                select,
                tracks.iter().enumerate().map(|(i, f)| (i.to_string(), option_label(f))),
            )?;
        }
        if let Some(select) = &inner.ui.soundfonts {
            fill_select(select, soundfonts.iter().map(|f| (f.to_string(), f.to_string())))?;
        }
        log::info!("player: {} tracks, {} soundfonts", tracks.len(), soundfonts.len());
        inner.session.set_tracks(tracks);
    }
    if let Ok(first) = soundfonts.get(0) {
        apply(shared, Command::SelectSoundFont(first.to_string()));
    }
    apply(shared, Command::Ready);
    Ok(())
}

fn on(id: &str, event: &'static str, callback: impl FnMut(web_sys::Event) + 'static) -> Result<Option<LoopHandle>, JsValue> {
    match dom::document()?.get_element_by_id(id) {
        Some(el) => LoopHandle::listen(&el, event, callback).map(Some),
        None => Ok(None),
    }
}

fn selected(event: &web_sys::Event) -> Option<String> {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        .map(|s| s.value())
}

/// MIDI player control surface over a page-supplied synthesizer and
/// sequencer.
#[wasm_bindgen]
pub struct PlayerController {
    shared: Shared,
    listeners: Vec<LoopHandle>,
}

#[wasm_bindgen]
impl PlayerController {
    #[wasm_bindgen(constructor)]
    pub fn new(synth: JsValue, sequencer: JsValue) -> Result<PlayerController, JsValue> {
        let shared = Rc::new(RefCell::new(Inner {
            session: PlayerSession::default(),
            synth,
            sequencer,
            ui: Ui::lookup()?,
            dropped: None,
            visualizer: None,
            notes: None,
            note_on: None,
        }));

        let mut listeners = Vec::new();
        let buttons = [
            ("btn-play", Command::Toggle),
            ("btn-stop", Command::Stop),
            ("btn-next", Command::Next),
            ("btn-prev", Command::Prev),
        ];
        for (id, command) in buttons {
            let s = shared.clone();
            listeners.extend(on(id, "click", move |_| apply(&s, command.clone()))?);
        }
        let s = shared.clone();
        listeners.extend(on("track-select", "change", move |e| {
            if let Some(index) = selected(&e).and_then(|v| v.parse().ok()) {
                apply(&s, Command::Select(index));
            }
        })?);
        let s = shared.clone();
        listeners.extend(on("sf-select", "change", move |e| {
            if let Some(name) = selected(&e) {
                apply(&s, Command::SelectSoundFont(name));
            }
        })?);

        Ok(PlayerController { shared, listeners })
    }

    /// Fetch the track and SoundFont indexes, fill the dropdowns and load the
    /// first SoundFont. Resolves once the lists are in place.
    pub fn init(&self) -> Promise {
        let shared = self.shared.clone();
        future_to_promise(async move {
            load_lists(&shared).await?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Run a control action by name: `toggle`, `stop`, `next` or `prev`.
    pub fn dispatch(&self, action: &str) {
        let command = match action {
            "toggle" | "play" => Command::Toggle,
            "stop" => Command::Stop,
            "next" => Command::Next,
            "prev" => Command::Prev,
            other => {
                log::warn!("player: unknown action {other}");
                return;
            }
        };
        apply(&self.shared, command);
    }

    /// Hand over a file dropped on the page.
    pub fn drop_file(&self, name: String, bytes: Uint8Array) {
        self.shared.borrow_mut().dropped = Some((name.clone(), bytes));
        apply(&self.shared, Command::Dropped(name));
    }

    /// Draw the analyser spectrum and song progress into `canvas`.
    pub fn visualize(&self, canvas: HtmlCanvasElement, analyser: AnalyserNode) -> Result<(), JsValue> {
        let sequencer = self.shared.borrow().sequencer.clone();
        let progress = move || {
            let read = |key: &str| Reflect::get(&sequencer, &key.into()).ok().and_then(|v| v.as_f64());
            Some((read("currentTime")?, read("duration")?))
        };
        let handle = audio::visualize(&canvas, analyser, progress)?;
        self.shared.borrow_mut().visualizer = Some(handle);
        Ok(())
    }

    /// Subscribe to the synthesizer's note-on events and draw them as
    /// falling notes into `canvas`, keeping the time display current.
    pub fn show_notes(&self, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(crate::GalleryError::NoContext("2d"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let rain = Rc::new(RefCell::new(NoteRain::new(f64::from(canvas.client_height()))));

        let sink = rain.clone();
        let on_note = Closure::wrap(Box::new(move |data: JsValue| {
            let read = |key: &str| {
                Reflect::get(&data, &key.into())
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0)
                    .clamp(0.0, 255.0) as u8
            };
            sink.borrow_mut()
                .note_on(read("midiNote"), read("velocity"), read("channel"));
        }) as Box<dyn FnMut(JsValue)>);
        let events = Reflect::get(&self.shared.borrow().synth, &"eventHandler".into())?;
        if events.is_undefined() {
            log::warn!("player: synth has no event handler, falling notes disabled");
        } else {
            let callback: &JsValue = on_note.as_ref();
            method(&events, "addEvent", &[NOTE_EVENT.into(), NOTE_LISTENER_ID.into(), callback.clone()])?;
        }

        let shared = self.shared.clone();
        let mut ended = false;
        let handle = run_loop("notes", Pacing::FrameSynced, move |dt| {
            canvas.set_width(canvas.client_width().max(0) as u32);
            canvas.set_height(canvas.client_height().max(0) as u32);
            let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
            ctx.clear_rect(0.0, 0.0, w, h);
            let mut rain = rain.borrow_mut();
            rain.set_height(h);
            rain.advance(dt);
            for note in rain.notes() {
                let (x, y, nw, nh) = note.rect(w);
                ctx.set_fill_style_str(&note.color());
                ctx.fill_rect(x, y, nw, nh);
            }

            let inner = shared.borrow();
            let read = |key: &str| Reflect::get(&inner.sequencer, &key.into()).ok().and_then(|v| v.as_f64());
            if let (Some(current), Some(duration)) = (read("currentTime"), read("duration")) {
                if let Some(el) = &inner.ui.time {
                    el.set_text_content(Some(&time_label(current, duration)));
                }
                let done = track_ended(current, duration);
                if done && !ended {
                    inner.ui.status("GAME OVER (TRACK ENDED)");
                }
                ended = done;
            }
            Ok(())
        })?;

        let mut inner = self.shared.borrow_mut();
        inner.notes = Some(handle);
        inner.note_on = Some(on_note);
        Ok(())
    }

    /// Detach every listener and stop the visualizers.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        let mut inner = self.shared.borrow_mut();
        inner.visualizer = None;
        inner.notes = None;
        if inner.note_on.take().is_some() {
            if let Ok(events) = Reflect::get(&inner.synth, &"eventHandler".into()) {
                method(&events, "removeEvent", &[NOTE_EVENT.into(), NOTE_LISTENER_ID.into()]).ok();
            }
        }
    }
}
