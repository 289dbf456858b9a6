use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, EventTarget};

use crate::pacing::{LoopState, Pacing, StopHandle};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

enum Driver {
    Frame,
    Timer { id: i32, _tick: Closure<dyn FnMut()> },
    Listener {
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    },
}

/// Revocable subscription for one running strategy. Dropping the handle
/// stops the loop.
pub struct LoopHandle {
    token: StopHandle,
    driver: Driver,
}

impl LoopHandle {
    pub fn token(&self) -> StopHandle {
        self.token.clone()
    }

    pub fn stop(&self) {
        if self.token.is_stopped() {
            return;
        }
        self.token.stop();
        let Some(win) = window() else { return };
        match &self.driver {
            // the frame closure drops itself on its next wake
            Driver::Frame => {}
            Driver::Timer { id, .. } => win.clear_interval_with_handle(*id),
            Driver::Listener {
                target,
                event,
                callback,
            } => {
                target
                    .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                    .ok();
            }
        }
    }

    /// Keep an event listener attached until the handle is stopped.
    pub fn listen(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            token: StopHandle::new(),
            driver: Driver::Listener {
                target: target.clone(),
                event,
                callback,
            },
        })
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Drive `step(dt)` with the given pacing until the returned handle is
/// stopped or a step fails. A failing step is logged and ends only this
/// loop.
pub fn run_loop<F>(name: &str, pacing: Pacing, step: F) -> Result<LoopHandle, JsValue>
where
    F: FnMut(f64) -> Result<(), JsValue> + 'static,
{
    match pacing {
        Pacing::FrameSynced => frame_loop(name, step),
        Pacing::Timer { period_ms } => timer_loop(name, period_ms, step),
    }
}

fn frame_loop<F>(name: &str, mut step: F) -> Result<LoopHandle, JsValue>
where
    F: FnMut(f64) -> Result<(), JsValue> + 'static,
{
    let win = window().ok_or("no window")?;
    let token = StopHandle::new();

    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself.
    let f: FrameSlot = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut state = LoopState::new(Pacing::FrameSynced);
    let stop = token.clone();
    let name = name.to_string();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if stop.is_stopped() {
            let _ = f.borrow_mut().take();
            return;
        }
        if let Some(dt) = state.wake(ts) {
            if let Err(e) = step(dt) {
                log::error!("{name}: animation stopped: {e:?}");
                stop.stop();
                let _ = f.borrow_mut().take();
                return;
            }
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            // schedule next
            w.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
        }
    }) as Box<dyn FnMut(f64)>));

    g.borrow()
        .as_ref()
        .ok_or("frame closure missing")
        .and_then(|cb| {
            win.request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|_| "requestAnimationFrame failed")
        })?;

    Ok(LoopHandle {
        token,
        driver: Driver::Frame,
    })
}

fn timer_loop<F>(name: &str, period_ms: u32, mut step: F) -> Result<LoopHandle, JsValue>
where
    F: FnMut(f64) -> Result<(), JsValue> + 'static,
{
    let win = window().ok_or("no window")?;
    let token = StopHandle::new();
    let interval: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let mut state = LoopState::new(Pacing::Timer { period_ms });
    let stop = token.clone();
    let own_id = interval.clone();
    let name = name.to_string();
    let tick = Closure::wrap(Box::new(move || {
        if stop.is_stopped() {
            return;
        }
        let Some(dt) = state.wake(now_ms()) else {
            return;
        };
        if let Err(e) = step(dt) {
            log::error!("{name}: animation stopped: {e:?}");
            stop.stop();
            if let (Some(w), Some(id)) = (window(), own_id.get()) {
                w.clear_interval_with_handle(id);
            }
        }
    }) as Box<dyn FnMut()>);

    let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
    let id = win.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        timeout,
    )?;
    interval.set(Some(id));

    Ok(LoopHandle {
        token,
        driver: Driver::Timer { id, _tick: tick },
    })
}
