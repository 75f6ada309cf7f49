//! Runtime tests

use std::time::{Duration, Instant};

use crate::session::GameState;
use crate::test_utils::{
    RecordingTracker, ScriptedSequences, TestSession, abc_config, ms, scripted_session,
};

use super::{Runtime, RuntimeConfig};

fn runtime_at_100hz() -> Runtime<ScriptedSequences, RecordingTracker> {
    let session: TestSession = scripted_session(abc_config(), &[&[0, 1, 0]]);
    Runtime::with_config(
        session,
        RuntimeConfig {
            tick_rate: 100,
            max_delta: ms(100),
        },
    )
}

// ============================================================================
// RuntimeConfig Tests
// ============================================================================

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.tick_rate, 60);
    assert_eq!(config.max_delta, Duration::from_millis(100));
}

#[test]
fn test_tick_duration_guards_zero_rate() {
    let config = RuntimeConfig {
        tick_rate: 0,
        max_delta: ms(100),
    };
    assert_eq!(config.tick_duration(), Duration::from_secs(1));
}

// ============================================================================
// Runtime Tests
// ============================================================================

#[test]
fn test_runtime_set_tick_rate() {
    let mut runtime = runtime_at_100hz();
    assert_eq!(runtime.tick_duration(), ms(10));

    runtime.set_tick_rate(50);
    assert_eq!(runtime.tick_rate(), 50);
    assert_eq!(runtime.tick_duration(), ms(20));
}

#[test]
fn test_first_frame_runs_one_tick() {
    let mut runtime = runtime_at_100hz();
    runtime.session_mut().start().unwrap();
    let ticks = runtime.frame_at(Instant::now(), 1.0);
    assert_eq!(ticks, 1);
    assert_eq!(runtime.session().now(), ms(10));
}

#[test]
fn test_frame_converts_wall_time_to_ticks() {
    let mut runtime = runtime_at_100hz();
    runtime.session_mut().start().unwrap();
    let t0 = Instant::now();
    runtime.frame_at(t0, 1.0);

    assert_eq!(runtime.frame_at(t0 + ms(50), 1.0), 5);
    assert_eq!(runtime.session().now(), ms(60));
}

#[test]
fn test_stalled_frame_is_clamped() {
    let mut runtime = runtime_at_100hz();
    runtime.session_mut().start().unwrap();
    let t0 = Instant::now();
    runtime.frame_at(t0, 1.0);

    assert_eq!(runtime.frame_at(t0 + Duration::from_secs(5), 1.0), 10);
    assert_eq!(runtime.session().state(), GameState::Presenting);
}

#[test]
fn test_time_scale() {
    let mut runtime = runtime_at_100hz();
    let t0 = Instant::now();
    runtime.frame_at(t0, 1.0);

    assert_eq!(runtime.frame_at(t0 + ms(40), 0.5), 2);
    assert_eq!(runtime.frame_at(t0 + ms(80), 0.0), 0);
    assert_eq!(runtime.frame_at(t0 + ms(100), 2.0), 4);
}

#[test]
fn test_runtime_reaches_recall() {
    let mut runtime = runtime_at_100hz();
    runtime.session_mut().start().unwrap();
    let t0 = Instant::now();
    let mut t = t0;
    while runtime.session().state() == GameState::Presenting {
        t += ms(50);
        runtime.frame_at(t, 1.0);
        assert!(t - t0 < Duration::from_secs(10));
    }
    assert_eq!(runtime.session().state(), GameState::AwaitingInput);
}

#[test]
fn test_reset_clock() {
    let mut runtime = runtime_at_100hz();
    let t0 = Instant::now();
    runtime.frame_at(t0, 1.0);
    runtime.reset_clock();
    // First frame after a reset behaves like the very first frame
    assert_eq!(runtime.frame_at(t0 + Duration::from_secs(30), 1.0), 1);
    assert_eq!(runtime.into_session().now(), ms(20));
}
