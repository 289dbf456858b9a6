use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Document, Element, HtmlElement};

use super::animation::LoopHandle;
use super::dom;
use super::strategies;
use crate::gallery::{build_layout, dispatch, Descriptor, LayoutSink, Registry, Strategy};

pub const TABLE_ID: &str = "gallery-table";
/// Frames to wait for every container to report a width before rendering
/// anyway.
pub const READY_MAX_FRAMES: u32 = 30;

/// Render entry point: sets up a strategy inside its container.
pub type RenderFn = Rc<dyn Fn(&HtmlElement) -> Result<LoopHandle, JsValue>>;

pub fn standard_registry() -> Registry<RenderFn> {
    Registry::new(
        Strategy::ALL
            .iter()
            .map(|&s| {
                let render: RenderFn = Rc::new(move |c: &HtmlElement| strategies::render(s, c));
                Descriptor::new(s.name(), render)
            })
            .collect(),
    )
}

struct DomSink {
    doc: Document,
    table: Element,
}

impl LayoutSink for DomSink {
    type Row = HtmlElement;
    type Container = HtmlElement;
    type Error = JsValue;

    fn append_row(&mut self) -> Result<HtmlElement, JsValue> {
        let row = dom::create(&self.doc, "tr")?;
        self.table.append_child(&row)?;
        Ok(row)
    }

    fn append_cell(&mut self, row: &HtmlElement, title: &str) -> Result<HtmlElement, JsValue> {
        let cell = dom::create(&self.doc, "td")?;

        let heading = dom::create(&self.doc, "div")?;
        heading.set_class_name("asset-title");
        heading.set_inner_text(title);
        cell.append_child(&heading)?;

        let container = dom::create(&self.doc, "div")?;
        container.set_class_name("asset-canvas-container");
        cell.append_child(&container)?;

        row.append_child(&cell)?;
        Ok(container)
    }
}

/// Best-effort text of a thrown value.
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Running strategies of one gallery.
#[derive(Clone, Default)]
pub struct Gallery {
    handles: Rc<RefCell<Vec<LoopHandle>>>,
}

impl Gallery {
    pub fn running(&self) -> usize {
        self.handles.borrow().iter().filter(|h| !h.token().is_stopped()).count()
    }

    pub fn stop_all(&self) {
        for handle in self.handles.borrow().iter() {
            handle.stop();
        }
        log::info!("gallery: stopped {} strategies", self.handles.borrow().len());
    }
}

/// Append one row per three descriptors and return the empty containers.
pub fn layout(table: &Element, registry: &Registry<RenderFn>) -> Result<Vec<HtmlElement>, JsValue> {
    let mut sink = DomSink {
        doc: dom::document()?,
        table: table.clone(),
    };
    build_layout(registry, &mut sink)
}

/// Invoke every render entry point now. A failing entry point leaves an
/// error message in its own cell.
pub fn render_into(registry: &Registry<RenderFn>, containers: &[HtmlElement], gallery: &Gallery) {
    let out = dispatch(
        registry,
        containers,
        |render, container| (**render)(container).map_err(|e| js_message(&e)),
        |container, text| container.set_inner_text(text),
    );
    log::info!(
        "gallery: {} running, {} failed",
        out.running.len(),
        out.failed.len()
    );
    gallery
        .handles
        .borrow_mut()
        .extend(out.running.into_iter().map(|(_, h)| h));
}

/// Build the table, then render once every container has a measured width.
pub fn start_gallery(table: &Element, registry: Registry<RenderFn>) -> Result<Gallery, JsValue> {
    let containers = layout(table, &registry)?;
    let gallery = Gallery::default();
    if containers.is_empty() {
        return Ok(gallery);
    }

    let win = window().ok_or("no window")?;
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let target = gallery.clone();
    let mut waited = 0;
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let ready = containers.iter().all(|c| c.client_width() > 0);
        if ready || waited >= READY_MAX_FRAMES {
            if !ready {
                log::warn!("gallery: containers unsized after {waited} frames, rendering anyway");
            }
            render_into(&registry, &containers, &target);
            let _ = f.borrow_mut().take();
            return;
        }
        waited += 1;
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            w.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = g.borrow().as_ref() {
        win.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(gallery)
}
