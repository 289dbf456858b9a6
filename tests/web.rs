#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gallery_wasm::gallery::{Descriptor, Registry};
use gallery_wasm::pacing::Pacing;
use gallery_wasm::wasm::{layout, render_into, run_loop, start_gallery, Gallery, LoopHandle, RenderFn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn table() -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let table = document.create_element("table").unwrap();
    document.body().unwrap().append_child(&table).unwrap();
    table
}

fn sized_table(style: &str) -> Element {
    let table = table();
    table.set_attribute("style", style).unwrap();
    table
}

fn three_cells() -> Registry<RenderFn> {
    Registry::new((0..3).map(|i| Descriptor::new(format!("{i}"), drawing("drawn"))).collect())
}

fn drawn(table: &Element) -> u32 {
    let containers = table.query_selector_all(".asset-canvas-container").unwrap();
    (0..containers.length())
        .filter(|&i| containers.item(i).and_then(|c| c.text_content()).as_deref() == Some("drawn"))
        .count() as u32
}

fn idle() -> Result<LoopHandle, JsValue> {
    run_loop("idle", Pacing::Timer { period_ms: 1000 }, |_| Ok(()))
}

fn drawing(text: &'static str) -> RenderFn {
    Rc::new(move |c: &HtmlElement| {
        c.set_inner_text(text);
        idle()
    })
}

fn failing() -> RenderFn {
    Rc::new(|_: &HtmlElement| Err(js_sys::Error::new("boom").into()))
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn twenty_descriptors_make_seven_rows() {
    let table = table();
    let registry = Registry::new((0..20).map(|i| Descriptor::new(format!("{i}"), drawing("x"))).collect());
    let containers = layout(&table, &registry).unwrap();

    let rows = table.query_selector_all("tr").unwrap();
    assert_eq!(rows.length(), 7);
    assert_eq!(table.query_selector_all("td").unwrap().length(), 20);
    assert_eq!(table.query_selector_all(".asset-title").unwrap().length(), 20);
    assert_eq!(containers.len(), 20);
    for c in &containers {
        assert_eq!(c.class_name(), "asset-canvas-container");
        assert_eq!(c.child_element_count(), 0);
    }
    let last = rows.item(6).unwrap().dyn_into::<Element>().unwrap();
    assert_eq!(last.child_element_count(), 2);
}

#[wasm_bindgen_test]
fn empty_registry_renders_nothing() {
    let table = table();
    let registry: Registry<RenderFn> = Registry::new(Vec::new());
    let containers = layout(&table, &registry).unwrap();
    let gallery = Gallery::default();
    render_into(&registry, &containers, &gallery);
    assert_eq!(table.child_element_count(), 0);
    assert_eq!(gallery.running(), 0);
}

#[wasm_bindgen_test]
fn thrown_error_is_shown_in_its_own_cell() {
    let table = table();
    let registry = Registry::new(vec![
        Descriptor::new("a", drawing("ok a")),
        Descriptor::new("b", failing()),
        Descriptor::new("c", drawing("ok c")),
    ]);
    let containers = layout(&table, &registry).unwrap();
    let gallery = Gallery::default();
    render_into(&registry, &containers, &gallery);

    assert_eq!(containers[1].text_content().unwrap(), "Error: boom");
    assert_eq!(containers[0].text_content().unwrap(), "ok a");
    assert_eq!(containers[2].text_content().unwrap(), "ok c");
    assert_eq!(gallery.running(), 2);

    gallery.stop_all();
    assert_eq!(gallery.running(), 0);
}

#[wasm_bindgen_test(async)]
async fn stopped_loop_no_longer_steps() {
    let steps = Rc::new(Cell::new(0u32));
    let counter = steps.clone();
    let handle = run_loop("count", Pacing::Timer { period_ms: 20 }, move |_| {
        counter.set(counter.get() + 1);
        Ok(())
    })
    .unwrap();

    sleep(200).await;
    assert!(steps.get() >= 1);
    handle.stop();
    let frozen = steps.get();
    sleep(100).await;
    assert_eq!(steps.get(), frozen);
}

#[wasm_bindgen_test(async)]
async fn frame_loop_steps_until_dropped() {
    let steps = Rc::new(Cell::new(0u32));
    let counter = steps.clone();
    let handle = run_loop("frames", Pacing::FrameSynced, move |_| {
        counter.set(counter.get() + 1);
        Ok(())
    })
    .unwrap();
    sleep(100).await;
    assert!(steps.get() >= 1);
    drop(handle);
    sleep(50).await;
    let frozen = steps.get();
    sleep(100).await;
    assert_eq!(steps.get(), frozen);
}

#[wasm_bindgen_test(async)]
async fn sized_gallery_renders_within_a_few_frames() {
    let table = sized_table("width: 600px");
    let gallery = start_gallery(&table, three_cells()).unwrap();
    assert_eq!(drawn(&table), 0);

    sleep(100).await;
    assert_eq!(drawn(&table), 3);
    assert_eq!(gallery.running(), 3);
    gallery.stop_all();
}

#[wasm_bindgen_test(async)]
async fn hidden_gallery_renders_after_the_frame_limit() {
    let table = sized_table("display: none");
    let gallery = start_gallery(&table, three_cells()).unwrap();

    // still polling: a hidden container never gets a width
    sleep(50).await;
    assert_eq!(drawn(&table), 0);

    sleep(2000).await;
    assert_eq!(drawn(&table), 3);
    assert_eq!(gallery.running(), 3);
    gallery.stop_all();
}
