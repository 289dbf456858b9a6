//! Loop pacing and cancellation shared by every animation loop.

use std::cell::Cell;
use std::rc::Rc;

/// Timers may fire up to this early relative to the nominal period before we
/// skip the step.
pub const TIMER_TOLERANCE_MS: f64 = 1.0;

/// Upper bound on a single step, so a backgrounded tab does not resume with a
/// huge jump.
pub const MAX_DT: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// One step per display frame.
    FrameSynced,
    /// One step per fixed interval.
    Timer { period_ms: u32 },
}

/// Bookkeeping for one running loop.
#[derive(Clone, Debug)]
pub struct LoopState {
    pacing: Pacing,
    last_step: Option<f64>,
    steps: u64,
}

impl LoopState {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            last_step: None,
            steps: 0,
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Called whenever the scheduler wakes the loop at `now_ms`. Returns the
    /// step length in seconds if a step should run.
    pub fn wake(&mut self, now_ms: f64) -> Option<f64> {
        let elapsed = self.last_step.map(|last| now_ms - last);
        let due = match (self.pacing, elapsed) {
            (_, None) => true,
            (Pacing::FrameSynced, Some(_)) => true,
            (Pacing::Timer { period_ms }, Some(e)) => e >= f64::from(period_ms) - TIMER_TOLERANCE_MS,
        };
        if !due {
            return None;
        }
        self.last_step = Some(now_ms);
        self.steps += 1;
        let dt = match (self.pacing, elapsed) {
            (Pacing::Timer { period_ms }, None) => f64::from(period_ms) / 1000.0,
            (Pacing::FrameSynced, None) => 1.0 / 60.0,
            (_, Some(e)) => e.max(0.0) / 1000.0,
        };
        Some(dt.min(MAX_DT))
    }
}

/// Shared cancellation token returned by every started strategy.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    cancelled: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.cancelled.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.cancelled.get()
    }
}
