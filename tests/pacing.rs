use gallery_wasm::gallery::Strategy;
use gallery_wasm::pacing::{LoopState, Pacing, StopHandle, MAX_DT};

const VSYNC_MS: f64 = 1000.0 / 60.0;

#[test]
fn frame_synced_steps_on_every_tick() {
    let mut state = LoopState::new(Pacing::FrameSynced);
    let mut draws = 0;
    let ticks = 240;
    for i in 0..ticks {
        if state.wake(i as f64 * VSYNC_MS).is_some() {
            draws += 1;
        }
    }
    assert_eq!(draws, ticks);
    assert_eq!(state.steps(), ticks as u64);
}

#[test]
fn timer_paced_never_steps_more_than_once_per_period() {
    let period = 100.0;
    let mut state = LoopState::new(Pacing::Timer { period_ms: 100 });
    let mut steps = Vec::new();
    // wake far more often than the period, with some jitter
    let mut now = 0.0;
    while now < 5000.0 {
        if state.wake(now).is_some() {
            steps.push(now);
        }
        now += 7.3;
    }
    for pair in steps.windows(2) {
        assert!(pair[1] - pair[0] >= period - 1.0, "{pair:?}");
    }
    assert!(steps.len() >= 40);
}

#[test]
fn timer_paced_steps_within_twice_the_period() {
    for period_ms in [50, 100, 500, 1000] {
        let mut state = LoopState::new(Pacing::Timer { period_ms });
        let period = f64::from(period_ms);
        let first = (0u32..)
            .map(|i| f64::from(i) * VSYNC_MS)
            .take_while(|&t| t <= 2.0 * period)
            .find(|&t| state.wake(t).is_some());
        assert!(first.is_some(), "period {period_ms}");
    }
}

#[test]
fn early_interval_fires_within_tolerance_still_step() {
    let mut state = LoopState::new(Pacing::Timer { period_ms: 50 });
    assert!(state.wake(0.0).is_some());
    assert!(state.wake(49.5).is_some());
    assert!(state.wake(80.0).is_none());
}

#[test]
fn dt_is_clamped_after_a_long_pause() {
    let mut state = LoopState::new(Pacing::FrameSynced);
    assert_eq!(state.wake(0.0), Some(1.0 / 60.0));
    assert_eq!(state.wake(30_000.0), Some(MAX_DT));

    let mut timer = LoopState::new(Pacing::Timer { period_ms: 1000 });
    assert_eq!(timer.wake(0.0), Some(MAX_DT));
}

#[test]
fn stop_handle_is_shared_between_clones() {
    let handle = StopHandle::new();
    let loop_side = handle.clone();
    assert!(!loop_side.is_stopped());
    handle.stop();
    assert!(loop_side.is_stopped());
}

#[test]
fn strategy_pacing_table() {
    assert_eq!(Strategy::MatrixRain.pacing(), Some(Pacing::Timer { period_ms: 50 }));
    assert_eq!(Strategy::RandomRects.pacing(), Some(Pacing::Timer { period_ms: 100 }));
    assert_eq!(Strategy::TextScramble.pacing(), Some(Pacing::Timer { period_ms: 100 }));
    assert_eq!(Strategy::VoronoiIsh.pacing(), Some(Pacing::Timer { period_ms: 1000 }));
    assert_eq!(Strategy::PiePulse.pacing(), Some(Pacing::Timer { period_ms: 500 }));
    assert_eq!(Strategy::CursorTracker.pacing(), None);
    assert_eq!(Strategy::BouncingBalls.pacing(), Some(Pacing::FrameSynced));
}
