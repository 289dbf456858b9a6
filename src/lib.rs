#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod chiptune;
pub mod easing;
pub mod error;
pub mod eyes;
pub mod gallery;
pub mod nostalgia;
pub mod pacing;
pub mod player;
pub mod sim;

pub use error::{GalleryError, Result};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod animation;
    mod audio;
    mod dom;
    mod eyes;
    mod harness;
    mod nostalgia;
    mod player;
    mod strategies;

    pub use animation::{run_loop, LoopHandle};
    pub use harness::{js_message, layout, render_into, start_gallery, Gallery, RenderFn};
    pub use player::PlayerController;

    impl From<crate::GalleryError> for JsValue {
        fn from(e: crate::GalleryError) -> Self {
            JsValue::from_str(&e.to_string())
        }
    }

    /// Entry point: wires up whichever of the gallery, the music button, the
    /// eye field and the nostalgia widget the hosting page contains.
    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(table) = document.get_element_by_id(harness::TABLE_ID) {
            let gallery = start_gallery(&table, harness::standard_registry())?;
            // the gallery lives for the lifetime of the page
            std::mem::forget(gallery);
        }
        if let Some(button) = document.get_element_by_id(audio::BUTTON_ID) {
            audio::attach(&button)?;
        }
        if let Some(bg) = document.get_element_by_id(eyes::FIELD_ID) {
            eyes::attach_field(&bg)?;
        }
        if let Some(container) = document.get_element_by_id(nostalgia::SYNTH_CONTAINER_ID) {
            nostalgia::attach_widget(&container)?;
        }
        nostalgia::install_fallbacks(&document)?;
        log::info!("gallery_wasm started");
        Ok(())
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
