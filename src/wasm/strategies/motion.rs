use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MouseEvent};

use super::super::animation::{run_loop, LoopHandle};
use super::super::dom::{self, create, set_styles};
use super::{pacing_of, Rng};
use crate::eyes::{pupil_offset, pupil_transform, TRACKER_PUPIL_RADIUS};
use crate::gallery::Strategy;
use crate::sim::{self, Simulation};

const CENTERED: &[(&str, &str)] = &[
    ("display", "flex"),
    ("justify-content", "center"),
    ("align-items", "center"),
];

pub fn cursor_tracker(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let doc = dom::document()?;
    set_styles(container, &[("position", "relative"), ("background-color", "#220022")])?;
    let mut eyes = Vec::with_capacity(2);
    for left in ["30%", "60%"] {
        let eye = create(&doc, "div")?;
        set_styles(
            &eye,
            &[
                ("width", "20px"),
                ("height", "20px"),
                ("background", "white"),
                ("border-radius", "50%"),
                ("position", "absolute"),
                ("top", "90px"),
                ("left", left),
            ],
        )?;
        let pupil = create(&doc, "div")?;
        set_styles(
            &pupil,
            &[
                ("width", "8px"),
                ("height", "8px"),
                ("background", "black"),
                ("border-radius", "50%"),
                ("position", "relative"),
                ("top", "6px"),
                ("left", "6px"),
            ],
        )?;
        eye.append_child(&pupil)?;
        container.append_child(&eye)?;
        eyes.push((eye, pupil));
    }

    let host = container.clone();
    LoopHandle::listen(container, "mousemove", move |event| {
        let Some(e) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let rect = host.get_bounding_client_rect();
        let pointer = (f64::from(e.client_x()), f64::from(e.client_y()));
        for (eye, pupil) in &eyes {
            let center = (
                rect.left() + f64::from(eye.offset_left()) + 10.0,
                rect.top() + f64::from(eye.offset_top()) + 10.0,
            );
            let offset = pupil_offset(center, pointer, TRACKER_PUPIL_RADIUS);
            pupil.style().set_property("transform", &pupil_transform(offset)).ok();
        }
    })
}

pub fn text_scramble(container: &HtmlElement, rng: Rng) -> Result<LoopHandle, JsValue> {
    let doc = dom::document()?;
    set_styles(container, CENTERED)?;
    set_styles(
        container,
        &[("font-family", "monospace"), ("font-size", "1.5em"), ("color", "#0f0")],
    )?;
    let el = create(&doc, "div")?;
    container.append_child(&el)?;
    let mut scramble = sim::TextScramble::new(rng);
    let s = Strategy::TextScramble;
    run_loop(s.name(), pacing_of(s), move |dt| {
        scramble.advance(dt);
        el.set_inner_text(scramble.text());
        Ok(())
    })
}

pub fn grid_stagger(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let doc = dom::document()?;
    let mut grid = sim::GridStagger::new();
    set_styles(
        container,
        &[
            ("display", "grid"),
            ("grid-template-columns", &format!("repeat({}, 1fr)", sim::GridStagger::SIDE)),
            ("gap", "2px"),
        ],
    )?;
    let cells = (0..grid.cells())
        .map(|_| -> Result<HtmlElement, JsValue> {
            let cell = create(&doc, "div")?;
            set_styles(&cell, &[("background-color", "magenta"), ("height", "100%")])?;
            container.append_child(&cell)?;
            Ok(cell)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let s = Strategy::GridStagger;
    run_loop(s.name(), pacing_of(s), move |dt| {
        grid.advance(dt);
        for (i, cell) in cells.iter().enumerate() {
            cell.style()
                .set_property("transform", &format!("scale({:.3})", grid.scale(i)))?;
        }
        Ok(())
    })
}

pub fn rotating_square(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let doc = dom::document()?;
    let square = create(&doc, "div")?;
    set_styles(
        &square,
        &[
            ("width", "50px"),
            ("height", "50px"),
            ("background-color", "cyan"),
            ("margin", "75px auto"),
        ],
    )?;
    container.append_child(&square)?;
    let mut motion = sim::RotatingSquare::new();
    let s = Strategy::RotatingSquare;
    run_loop(s.name(), pacing_of(s), move |dt| {
        motion.advance(dt);
        set_styles(
            &square,
            &[
                ("transform", &format!("rotate({:.4}turn)", motion.turns())),
                ("border-radius", &format!("{:.2}%", motion.border_radius_pct())),
                ("background-color", &motion.color()),
            ],
        )
    })
}

pub fn bouncing_text(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let doc = dom::document()?;
    set_styles(container, CENTERED)?;
    set_styles(container, &[("font-size", "2em")])?;
    let mut text = sim::BouncingText::new();
    let mut spans = Vec::new();
    for letter in text.letters() {
        let span = create(&doc, "span")?;
        span.set_inner_text(&letter.to_string());
        set_styles(&span, &[("color", "lime"), ("display", "inline-block")])?;
        container.append_child(&span)?;
        spans.push(span);
    }
    let s = Strategy::BouncingText;
    run_loop(s.name(), pacing_of(s), move |dt| {
        text.advance(dt);
        for (i, span) in spans.iter().enumerate() {
            span.style()
                .set_property("transform", &format!("translateY({:.2}px)", text.offset(i)))?;
        }
        Ok(())
    })
}

pub fn orbit(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let doc = dom::document()?;
    set_styles(container, &[("position", "relative")])?;
    let dot = create(&doc, "div")?;
    set_styles(
        &dot,
        &[
            ("width", "20px"),
            ("height", "20px"),
            ("background-color", "red"),
            ("border-radius", "50%"),
            ("position", "absolute"),
            ("top", "90px"),
            ("left", "90px"),
        ],
    )?;
    container.append_child(&dot)?;
    let mut orbit = sim::Orbit::new();
    let s = Strategy::Orbit;
    run_loop(s.name(), pacing_of(s), move |dt| {
        orbit.advance(dt);
        let transform = format!(
            "translateX({:.2}px) rotate({:.4}turn)",
            orbit.translate_x(),
            orbit.turns()
        );
        dot.style().set_property("transform", &transform)
    })
}
