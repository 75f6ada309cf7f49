//! Difficulty planning
//!
//! Maps a round number to sequence length and presentation timing. Length grows
//! linearly and saturates at a cap; show and gap durations shrink per round
//! down to a floor so the game never becomes unplayably fast.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable difficulty curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Length before any growth is applied (default: 2)
    #[serde(default = "default_base_length")]
    pub base_length: u32,
    /// Tokens added per round, floored (default: 1.0)
    #[serde(default = "default_growth_rate")]
    pub growth_rate: f64,
    /// Shortest sequence ever planned, never below 1 (default: 1)
    #[serde(default = "default_min_length")]
    pub min_length: u32,
    /// Longest sequence ever planned (default: 12)
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    /// How long a token stays lit in round 0 (default: 800ms)
    #[serde(default = "default_base_speed_ms")]
    pub base_speed_ms: u32,
    /// Lit-time reduction per round (default: 40ms)
    #[serde(default = "default_speed_decay_ms")]
    pub speed_decay_ms: u32,
    /// Lit-time floor (default: 300ms)
    #[serde(default = "default_min_speed_ms")]
    pub min_speed_ms: u32,
    /// Gap between tokens in round 0 (default: 400ms)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u32,
    /// Gap reduction per round (default: 20ms)
    #[serde(default = "default_delay_decay_ms")]
    pub delay_decay_ms: u32,
    /// Gap floor (default: 150ms)
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u32,
}

fn default_base_length() -> u32 {
    2
}
fn default_growth_rate() -> f64 {
    1.0
}
fn default_min_length() -> u32 {
    1
}
fn default_max_length() -> u32 {
    12
}
fn default_base_speed_ms() -> u32 {
    800
}
fn default_speed_decay_ms() -> u32 {
    40
}
fn default_min_speed_ms() -> u32 {
    300
}
fn default_base_delay_ms() -> u32 {
    400
}
fn default_delay_decay_ms() -> u32 {
    20
}
fn default_min_delay_ms() -> u32 {
    150
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_length: default_base_length(),
            growth_rate: default_growth_rate(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            base_speed_ms: default_base_speed_ms(),
            speed_decay_ms: default_speed_decay_ms(),
            min_speed_ms: default_min_speed_ms(),
            base_delay_ms: default_base_delay_ms(),
            delay_decay_ms: default_delay_decay_ms(),
            min_delay_ms: default_min_delay_ms(),
        }
    }
}

/// Parameters for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPlan {
    pub sequence_length: usize,
    pub presentation_speed_ms: u32,
    pub inter_item_delay_ms: u32,
}

impl RoundPlan {
    /// How long each token stays lit
    pub fn show_duration(&self) -> Duration {
        Duration::from_millis(self.presentation_speed_ms as u64)
    }

    /// Pause after each token goes dark
    pub fn gap_duration(&self) -> Duration {
        Duration::from_millis(self.inter_item_delay_ms as u64)
    }

    /// Total time needed to present the whole sequence
    pub fn presentation_time(&self) -> Duration {
        (self.show_duration() + self.gap_duration()) * self.sequence_length as u32
    }
}

/// Pure difficulty planner
#[derive(Debug, Clone, Default)]
pub struct DifficultyPlanner {
    config: PlannerConfig,
}

impl DifficultyPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a round. Deterministic in `round`; degenerate configs are clamped.
    pub fn plan(&self, round: u32) -> RoundPlan {
        let c = &self.config;

        let min_length = c.min_length.max(1);
        let max_length = c.max_length.max(min_length);
        let growth = (round as f64 * c.growth_rate.max(0.0)).floor();
        // Float-to-int casts saturate, so NaN lands on 0 and huge values on u32::MAX
        let raw_length = c.base_length.saturating_add(growth as u32);
        let sequence_length = raw_length.clamp(min_length, max_length) as usize;

        RoundPlan {
            sequence_length,
            presentation_speed_ms: decay(c.base_speed_ms, c.speed_decay_ms, c.min_speed_ms, round),
            inter_item_delay_ms: decay(c.base_delay_ms, c.delay_decay_ms, c.min_delay_ms, round),
        }
    }
}

/// `clamp(base - round * step, floor, base)` without underflow
fn decay(base: u32, step: u32, floor: u32, round: u32) -> u32 {
    let floor = floor.min(base);
    let reduction = (step as u64).saturating_mul(round as u64);
    let value = (base as u64).saturating_sub(reduction) as u32;
    value.clamp(floor, base)
}
