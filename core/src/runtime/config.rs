//! Runtime configuration

use std::time::Duration;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Engine tick rate in Hz
    pub tick_rate: u32,
    /// Maximum delta time clamp (a stalled frame must not skip a whole presentation)
    pub max_delta: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_delta: Duration::from_millis(100),
        }
    }
}

impl RuntimeConfig {
    /// Time per tick (inverse of tick rate)
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }
}
