//! Frame execution with fixed timestep

use std::time::{Duration, Instant};

use crate::generator::SequenceSource;
use crate::session::Session;
use crate::tracker::SessionTracker;

use super::RuntimeConfig;

/// Execute a single frame with optional time scaling
///
/// Converts the wall-clock time since the previous frame into whole engine
/// ticks. Returns the number of ticks executed.
pub fn execute_frame<S: SequenceSource, T: SessionTracker>(
    config: &RuntimeConfig,
    tick_duration: Duration,
    accumulator: &mut Duration,
    last_update: &mut Option<Instant>,
    now: Instant,
    session: &mut Session<S, T>,
    time_scale: f32,
) -> u32 {
    // Calculate delta time
    let delta = match *last_update {
        Some(last) => now.saturating_duration_since(last).min(config.max_delta),
        None => tick_duration,
    };
    *last_update = Some(now);

    // Apply time scale to delta before accumulating
    *accumulator += if time_scale == 1.0 {
        delta
    } else {
        delta.mul_f64(time_scale.max(0.0) as f64)
    };

    let mut ticks = 0u32;
    while *accumulator >= tick_duration {
        session.advance(tick_duration);
        *accumulator -= tick_duration;
        ticks += 1;
    }

    if ticks > 0 {
        tracing::trace!(ticks, state = ?session.state(), "frame advanced");
    }
    ticks
}
