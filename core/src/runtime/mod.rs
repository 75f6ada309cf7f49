//! Real-time driver
//!
//! The session only knows virtual time. [`Runtime`] feeds it wall-clock time
//! in fixed ticks, the way an interactive front-end's render loop would.

use std::time::{Duration, Instant};

use crate::generator::SequenceSource;
use crate::session::Session;
use crate::tracker::SessionTracker;

mod config;
mod game_loop;

#[cfg(test)]
mod tests;

pub use config::RuntimeConfig;
pub use game_loop::execute_frame;

/// Drives a session from the wall clock with fixed timestep updates
pub struct Runtime<S: SequenceSource, T: SessionTracker> {
    config: RuntimeConfig,
    session: Session<S, T>,
    accumulator: Duration,
    last_update: Option<Instant>,
    tick_duration: Duration,
}

impl<S: SequenceSource, T: SessionTracker> Runtime<S, T> {
    /// Create a runtime with the default 60 Hz tick rate
    pub fn new(session: Session<S, T>) -> Self {
        Self::with_config(session, RuntimeConfig::default())
    }

    pub fn with_config(session: Session<S, T>, config: RuntimeConfig) -> Self {
        let tick_duration = config.tick_duration();
        Self {
            config,
            session,
            accumulator: Duration::ZERO,
            last_update: None,
            tick_duration,
        }
    }

    /// Set the tick rate
    pub fn set_tick_rate(&mut self, tick_rate: u32) {
        self.config.tick_rate = tick_rate;
        self.tick_duration = self.config.tick_duration();
    }

    /// Get the current tick rate
    pub fn tick_rate(&self) -> u32 {
        self.config.tick_rate
    }

    /// Get the tick duration (time per tick, inverse of tick rate)
    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Run a single frame (may include multiple ticks)
    ///
    /// Returns the number of ticks that were executed.
    pub fn frame(&mut self) -> u32 {
        self.frame_at(Instant::now(), 1.0)
    }

    /// Run a frame with a time scale modifier.
    ///
    /// - 1.0 = normal speed
    /// - 0.5 = half speed (slow motion)
    /// - 2.0 = double speed
    pub fn frame_with_time_scale(&mut self, time_scale: f32) -> u32 {
        self.frame_at(Instant::now(), time_scale)
    }

    /// Run a frame as if the wall clock read `now`
    pub fn frame_at(&mut self, now: Instant, time_scale: f32) -> u32 {
        execute_frame(
            &self.config,
            self.tick_duration,
            &mut self.accumulator,
            &mut self.last_update,
            now,
            &mut self.session,
            time_scale,
        )
    }

    /// Forget frame timing, e.g. after blocking on player input
    pub fn reset_clock(&mut self) {
        self.accumulator = Duration::ZERO;
        self.last_update = None;
    }

    pub fn session(&self) -> &Session<S, T> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S, T> {
        &mut self.session
    }

    pub fn into_session(self) -> Session<S, T> {
        self.session
    }
}
