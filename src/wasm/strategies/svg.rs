use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, SvgGeometryElement};

use super::super::animation::{run_loop, LoopHandle};
use super::super::dom::{self, bounds_of, clear_children, create_svg, set_attrs, svg_in};
use super::{pacing_of, Rng};
use crate::gallery::{Strategy, CELL_HEIGHT};
use crate::sim::{self, Simulation};

fn shapes(svg: &Element, tag: &str, count: usize) -> Result<Vec<Element>, JsValue> {
    let doc = dom::document()?;
    (0..count)
        .map(|_| -> Result<Element, JsValue> {
            let el = create_svg(&doc, tag)?;
            svg.append_child(&el)?;
            Ok(el)
        })
        .collect()
}

fn num(v: f64) -> String {
    format!("{v:.2}")
}

pub fn random_bars(container: &HtmlElement, rng: Rng) -> Result<LoopHandle, JsValue> {
    let svg = svg_in(container)?;
    let mut chart = sim::RandomBars::new(bounds_of(container), rng);
    let rects = shapes(&svg, "rect", sim::RandomBars::COUNT)?;
    let s = Strategy::RandomBars;
    run_loop(s.name(), pacing_of(s), move |dt| {
        chart.advance(dt);
        for (el, (x, y, w, h, fill)) in rects.iter().zip(chart.bars()) {
            set_attrs(
                el,
                &[("x", &num(x)), ("y", &num(y)), ("width", &num(w)), ("height", &num(h)), ("fill", fill)],
            )?;
        }
        Ok(())
    })
}

pub fn force_nodes(container: &HtmlElement, mut rng: Rng) -> Result<LoopHandle, JsValue> {
    let svg = svg_in(container)?;
    let mut layout = sim::ForceNodes::new(bounds_of(container), &mut rng);
    let circles = shapes(&svg, "circle", sim::ForceNodes::COUNT)?;
    for (i, (el, node)) in circles.iter().zip(layout.nodes()).enumerate() {
        let fill = sim::ForceNodes::PALETTE[i % sim::ForceNodes::PALETTE.len()];
        set_attrs(el, &[("r", &num(node.radius)), ("fill", fill)])?;
    }
    let s = Strategy::ForceNodes;
    run_loop(s.name(), pacing_of(s), move |dt| {
        layout.advance(dt);
        for (el, node) in circles.iter().zip(layout.nodes()) {
            set_attrs(el, &[("cx", &num(node.x)), ("cy", &num(node.y))])?;
        }
        Ok(())
    })
}

pub fn circles(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let svg = svg_in(container)?;
    let mut orbiters = sim::Orbiters::new(bounds_of(container));
    let circles = shapes(&svg, "circle", sim::Orbiters::COUNT)?;
    for el in &circles {
        set_attrs(el, &[("fill", "cyan"), ("stroke", "white")])?;
    }
    let s = Strategy::Circles;
    run_loop(s.name(), pacing_of(s), move |dt| {
        for (el, (cx, cy, r)) in circles.iter().zip(orbiters.circles()) {
            set_attrs(el, &[("cx", &num(cx)), ("cy", &num(cy)), ("r", &num(r))])?;
        }
        orbiters.advance(dt);
        Ok(())
    })
}

fn draw_scatter(svg: &Element, scatter: &sim::ScatterLinks) -> Result<(), JsValue> {
    let doc = dom::document()?;
    clear_children(svg);
    for &(x, y) in scatter.points() {
        let c = create_svg(&doc, "circle")?;
        set_attrs(&c, &[("cx", &num(x)), ("cy", &num(y)), ("r", "2"), ("fill", "lime")])?;
        svg.append_child(&c)?;
    }
    for ((x1, y1), (x2, y2)) in scatter.links() {
        let line = create_svg(&doc, "line")?;
        set_attrs(
            &line,
            &[
                ("x1", &num(x1)),
                ("y1", &num(y1)),
                ("x2", &num(x2)),
                ("y2", &num(y2)),
                ("stroke", "rgba(0,255,0,0.3)"),
            ],
        )?;
        svg.append_child(&line)?;
    }
    Ok(())
}

pub fn voronoi_ish(container: &HtmlElement, rng: Rng) -> Result<LoopHandle, JsValue> {
    let svg = svg_in(container)?;
    let mut scatter = sim::ScatterLinks::new(bounds_of(container), rng);
    draw_scatter(&svg, &scatter)?;
    let s = Strategy::VoronoiIsh;
    run_loop(s.name(), pacing_of(s), move |dt| {
        scatter.advance(dt);
        draw_scatter(&svg, &scatter)
    })
}

pub fn pie_pulse(container: &HtmlElement, rng: Rng) -> Result<LoopHandle, JsValue> {
    let doc = dom::document()?;
    let svg = svg_in(container)?;
    let b = bounds_of(container);
    let centre = create_svg(&doc, "g")?;
    set_attrs(&centre, &[("transform", &format!("translate({},{})", b.width / 2.0, b.height / 2.0))])?;
    svg.append_child(&centre)?;
    let pulse = create_svg(&doc, "g")?;
    set_attrs(&pulse, &[("style", "transition: transform 250ms ease-in-out")])?;
    centre.append_child(&pulse)?;
    let paths = shapes(&pulse, "path", sim::PiePulse::COLORS.len())?;

    let mut pie = sim::PiePulse::new(rng);
    let draw = move |pie: &sim::PiePulse| -> Result<(), JsValue> {
        for ((el, slice), color) in paths.iter().zip(pie.slices()).zip(sim::PiePulse::COLORS) {
            set_attrs(el, &[("d", &slice.path(sim::PiePulse::RADIUS)), ("fill", color)])?;
        }
        let scale = format!("transform: scale({:.3}); transition: transform 250ms ease-in-out", pie.scale());
        set_attrs(&pulse, &[("style", &scale)])
    };
    draw(&pie)?;
    let s = Strategy::PiePulse;
    run_loop(s.name(), pacing_of(s), move |dt| {
        pie.advance(dt);
        draw(&pie)
    })
}

pub fn path_trace(container: &HtmlElement) -> Result<LoopHandle, JsValue> {
    let doc = dom::document()?;
    let svg = svg_in(container)?;
    set_attrs(&svg, &[("viewBox", &format!("0 0 200 {CELL_HEIGHT}"))])?;
    let path = create_svg(&doc, "path")?;
    set_attrs(
        &path,
        &[
            ("d", sim::PathTrace::PATH),
            ("stroke", "yellow"),
            ("stroke-width", "5"),
            ("fill", "none"),
        ],
    )?;
    svg.append_child(&path)?;
    let length = path
        .dyn_ref::<SvgGeometryElement>()
        .map(|g| f64::from(g.get_total_length()))
        .unwrap_or(0.0);
    set_attrs(&path, &[("stroke-dasharray", &num(length))])?;

    let mut trace = sim::PathTrace::new(length);
    let s = Strategy::PathTrace;
    run_loop(s.name(), pacing_of(s), move |dt| {
        trace.advance(dt);
        set_attrs(&path, &[("stroke-dashoffset", &num(trace.dash_offset()))])
    })
}
