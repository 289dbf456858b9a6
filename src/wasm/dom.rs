use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement};

use crate::gallery::CELL_HEIGHT;
use crate::sim::Bounds;
use crate::GalleryError;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn document() -> Result<Document, JsValue> {
    Ok(web_sys::window()
        .ok_or_else(|| GalleryError::MissingElement("window".into()))?
        .document()
        .ok_or_else(|| GalleryError::MissingElement("document".into()))?)
}

pub fn create(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.dyn_into::<HtmlElement>()?)
}

pub fn create_svg(doc: &Document, tag: &str) -> Result<Element, JsValue> {
    doc.create_element_ns(Some(SVG_NS), tag)
}

pub fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = el.style();
    for (name, value) in styles {
        style.set_property(name, value)?;
    }
    Ok(())
}

pub fn set_attrs(el: &Element, attrs: &[(&str, &str)]) -> Result<(), JsValue> {
    for (name, value) in attrs {
        el.set_attribute(name, value)?;
    }
    Ok(())
}

/// Surface extent for a container: its measured width by the fixed cell
/// height. A container that has not been laid out yet yields a zero width.
pub fn bounds_of(container: &HtmlElement) -> Bounds {
    Bounds::new(f64::from(container.client_width()), f64::from(CELL_HEIGHT))
}

/// Fresh canvas sized to the container, appended to it.
pub fn canvas_in(
    container: &HtmlElement,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let doc = document()?;
    let canvas = doc.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(container.client_width().max(0) as u32);
    canvas.set_height(CELL_HEIGHT);
    container.append_child(&canvas)?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or(GalleryError::NoContext("2d"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((canvas, ctx))
}

/// Fresh `<svg>` sized to the container, appended to it.
pub fn svg_in(container: &HtmlElement) -> Result<Element, JsValue> {
    let doc = document()?;
    let svg = create_svg(&doc, "svg")?;
    let Bounds { width, height } = bounds_of(container);
    set_attrs(&svg, &[("width", &width.to_string()), ("height", &height.to_string())])?;
    container.append_child(&svg)?;
    Ok(svg)
}

pub fn clear_children(el: &Element) {
    while let Some(child) = el.first_child() {
        if el.remove_child(&child).is_err() {
            break;
        }
    }
}
