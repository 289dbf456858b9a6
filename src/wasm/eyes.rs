use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Element, HtmlElement, MouseEvent};

use super::dom;
use crate::eyes::{pupil_offset, pupil_transform, EyeField, FIELD_PUPIL_RADIUS, RESIZE_DEBOUNCE_MS};

pub const FIELD_ID: &str = "eyeball-bg";

type Eyes = Rc<RefCell<Vec<(HtmlElement, HtmlElement)>>>;

fn populate(bg: &Element, eyes: &Eyes) -> Result<(), JsValue> {
    let win = window().ok_or("no window")?;
    let doc = dom::document()?;
    let width = win.inner_width()?.as_f64().unwrap_or(0.0);
    let height = win.inner_height()?.as_f64().unwrap_or(0.0);
    let mut rng = crate::sim::rng(super::strategies::seed());
    let field = EyeField::generate(width, height, &mut rng);

    dom::clear_children(bg);
    let mut built = Vec::with_capacity(field.len());
    for &(left, top) in field.positions() {
        let eye = dom::create(&doc, "div")?;
        eye.set_class_name("eyeball");
        dom::set_styles(&eye, &[("left", &format!("{left:.1}px")), ("top", &format!("{top:.1}px"))])?;
        let pupil = dom::create(&doc, "div")?;
        pupil.set_class_name("pupil");
        eye.append_child(&pupil)?;
        bg.append_child(&eye)?;
        built.push((eye, pupil));
    }
    log::debug!("eye field: {} eyes", built.len());
    *eyes.borrow_mut() = built;
    Ok(())
}

/// Fill `bg` with eyes that follow the pointer, rebuilding the field after
/// the viewport settles from a resize.
pub fn attach_field(bg: &Element) -> Result<(), JsValue> {
    let win = window().ok_or("no window")?;
    let eyes: Eyes = Rc::new(RefCell::new(Vec::new()));
    populate(bg, &eyes)?;

    let rebuild = {
        let bg = bg.clone();
        let eyes = eyes.clone();
        Closure::wrap(Box::new(move || {
            if let Err(e) = populate(&bg, &eyes) {
                log::error!("eye field rebuild failed: {e:?}");
            }
        }) as Box<dyn FnMut()>)
    };
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let resize = Closure::wrap(Box::new(move || {
        let Some(w) = window() else { return };
        if let Some(id) = pending.take() {
            w.clear_timeout_with_handle(id);
        }
        let id = w
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                rebuild.as_ref().unchecked_ref(),
                RESIZE_DEBOUNCE_MS,
            )
            .ok();
        pending.set(id);
    }) as Box<dyn FnMut()>);
    win.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
    resize.forget();

    let track = Closure::wrap(Box::new(move |e: MouseEvent| {
        let pointer = (f64::from(e.client_x()), f64::from(e.client_y()));
        for (eye, pupil) in eyes.borrow().iter() {
            let rect = eye.get_bounding_client_rect();
            let center = (
                rect.left() + rect.width() / 2.0,
                rect.top() + rect.height() / 2.0,
            );
            let offset = pupil_offset(center, pointer, FIELD_PUPIL_RADIUS);
            pupil.style().set_property("transform", &pupil_transform(offset)).ok();
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    dom::document()?
        .add_event_listener_with_callback("mousemove", track.as_ref().unchecked_ref())?;
    track.forget();
    Ok(())
}
