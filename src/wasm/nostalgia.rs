use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, Document, Element, HtmlElement, HtmlImageElement, Response};

use super::dom;
use crate::nostalgia::{
    probe_from_status, widget_status, Placeholder, Probe, WidgetEvent, PLACEHOLDER_HEIGHT, SONG_URL,
};

pub const SYNTH_CONTAINER_ID: &str = "synth-container";
const SYNTH_TAG: &str = "webaudio-tinysynth";
const FALLBACK_SELECTOR: &str = ".fallback-img";
const FALLBACK_MARK: &str = "data-has-fallback";

fn call(target: &JsValue, name: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &name.into())?
        .dyn_into::<Function>()?
        .call0(target)
}

fn show(status: Option<&HtmlElement>, event: WidgetEvent) {
    let Some(el) = status else { return };
    let line = widget_status(event);
    el.set_text_content(Some(&line.text));
    if line.error {
        el.style().set_property("color", "red").ok();
    }
}

async fn probe(url: &str) -> Probe {
    let Some(win) = window() else {
        return Probe::Unreachable;
    };
    match JsFuture::from(win.fetch_with_str(url)).await.and_then(|r| r.dyn_into::<Response>()) {
        Ok(resp) => probe_from_status(resp.ok(), resp.status()),
        Err(e) => {
            log::warn!("nostalgia: {url}: {e:?}");
            Probe::Unreachable
        }
    }
}

fn on_click(id: &str, doc: &Document, mut callback: impl FnMut() + 'static) -> Result<(), JsValue> {
    let Some(button) = doc.get_element_by_id(id) else {
        return Ok(());
    };
    let click = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
    button.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();
    Ok(())
}

/// Single-song player: a page-supplied `<webaudio-tinysynth>` element driven
/// by the play/stop buttons, with a status line that reports whether the
/// song can be fetched.
pub fn attach_widget(container: &Element) -> Result<(), JsValue> {
    let doc = dom::document()?;
    let synth = doc.create_element(SYNTH_TAG)?;
    synth.set_id("synth");
    synth.set_attribute("voices", "64")?;
    container.append_child(&synth)?;
    Reflect::set(&synth, &"src".into(), &SONG_URL.into())?;

    let status = doc
        .get_element_by_id("status")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());

    let (player, line) = (synth.clone(), status.clone());
    on_click("play-btn", &doc, move || {
        // the audio context may only start from a gesture
        if let Ok(ctx) = call(&player, "getAudioContext") {
            if Reflect::get(&ctx, &"state".into()).ok().and_then(|s| s.as_string()).as_deref()
                == Some("suspended")
            {
                call(&ctx, "resume").ok();
            }
        }
        match call(&player, "playMIDI") {
            Ok(_) => show(line.as_ref(), WidgetEvent::Play),
            Err(e) => log::error!("nostalgia: play failed: {e:?}"),
        }
    })?;
    let (player, line) = (synth.clone(), status.clone());
    on_click("stop-btn", &doc, move || match call(&player, "stopMIDI") {
        Ok(_) => show(line.as_ref(), WidgetEvent::Stop),
        Err(e) => log::error!("nostalgia: stop failed: {e:?}"),
    })?;

    spawn_local(async move {
        let result = probe(SONG_URL).await;
        log::info!("nostalgia: {SONG_URL}: {result:?}");
        show(status.as_ref(), WidgetEvent::Checked(result));
    });
    Ok(())
}

fn replace_with_placeholder(img: &HtmlImageElement) -> Result<(), JsValue> {
    if img.has_attribute(FALLBACK_MARK) {
        return Ok(());
    }
    img.set_attribute(FALLBACK_MARK, "true")?;
    log::info!("image failed to load: {}", img.src());

    let alt = img.get_attribute("alt");
    let color = img.get_attribute("data-fallback-color");
    let placeholder = Placeholder::for_image(alt.as_deref(), color.as_deref());
    let doc = dom::document()?;
    let div = dom::create(&doc, "div")?;
    div.set_class_name("fallback-placeholder polaroid-placeholder");
    div.set_inner_text(&placeholder.label);
    dom::set_styles(
        &div,
        &[
            ("background-color", &placeholder.color),
            ("width", "100%"),
            ("height", PLACEHOLDER_HEIGHT),
            ("display", "flex"),
            ("align-items", "center"),
            ("justify-content", "center"),
            ("color", "white"),
            ("font-weight", "bold"),
            ("text-shadow", "1px 1px black"),
            ("text-align", "center"),
            ("padding", "10px"),
            ("box-sizing", "border-box"),
        ],
    )?;
    if let Some(parent) = img.parent_node() {
        parent.replace_child(&div, img)?;
    }
    Ok(())
}

/// Swap every `.fallback-img` that is already broken, or breaks later, for a
/// coloured placeholder labelled with its alt text.
pub fn install_fallbacks(doc: &Document) -> Result<usize, JsValue> {
    let images = doc.query_selector_all(FALLBACK_SELECTOR)?;
    let mut watched = 0;
    for i in 0..images.length() {
        let Some(img) = images.item(i).and_then(|n| n.dyn_into::<HtmlImageElement>().ok()) else {
            continue;
        };
        if img.complete() && img.natural_width() == 0 {
            replace_with_placeholder(&img)?;
            continue;
        }
        let target = img.clone();
        let onerror = Closure::wrap(Box::new(move || {
            if let Err(e) = replace_with_placeholder(&target) {
                log::error!("fallback image: {e:?}");
            }
        }) as Box<dyn FnMut()>);
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
        watched += 1;
    }
    Ok(watched)
}
