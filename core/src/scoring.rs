//! Scoring policy and session aggregates
//!
//! Default policy: 10 points per correct token, 50 for finishing a round, one
//! life, no penalty. A single wrong token ends the session. Variants raise
//! `lives` to allow retries and set `mistake_penalty` to subtract points.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-variant scoring rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points per correctly recalled token (default: 10)
    #[serde(default = "default_token_reward")]
    pub token_reward: u32,
    /// Points for reproducing the whole sequence (default: 50)
    #[serde(default = "default_round_bonus")]
    pub round_bonus: u32,
    /// Wrong inputs tolerated before game over (default: 1)
    #[serde(default = "default_lives")]
    pub lives: u32,
    /// Points removed per wrong input, saturating at zero (default: 0)
    #[serde(default)]
    pub mistake_penalty: u32,
    /// Finish the session after this round (default: unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rounds: Option<u32>,
    /// Pause between a resolved round and the next presentation (default: 1000ms)
    #[serde(default = "default_round_pause_ms")]
    pub round_pause_ms: u32,
}

fn default_token_reward() -> u32 {
    10
}
fn default_round_bonus() -> u32 {
    50
}
fn default_lives() -> u32 {
    1
}
fn default_round_pause_ms() -> u32 {
    1000
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            token_reward: default_token_reward(),
            round_bonus: default_round_bonus(),
            lives: default_lives(),
            mistake_penalty: 0,
            max_rounds: None,
            round_pause_ms: default_round_pause_ms(),
        }
    }
}

impl ScoringConfig {
    pub fn round_pause(&self) -> Duration {
        Duration::from_millis(self.round_pause_ms as u64)
    }
}

/// What happens after a wrong input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MistakeVerdict {
    /// Lives remain; the round will be replayed
    Retry { lives_left: u32 },
    /// No lives remain
    GameOver,
}

/// Score, round counter, lives and streak for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub round: u32,
    pub lives: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl Scoreboard {
    /// Fresh board at round 1
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            score: 0,
            round: 1,
            lives: config.lives.max(1),
            streak: 0,
            best_streak: 0,
        }
    }

    pub fn credit_token(&mut self, config: &ScoringConfig) {
        self.score = self.score.saturating_add(config.token_reward);
    }

    /// Award the completion bonus and move to the next round
    ///
    /// Returns the bonus awarded.
    pub fn complete_round(&mut self, config: &ScoringConfig) -> u32 {
        self.score = self.score.saturating_add(config.round_bonus);
        self.round += 1;
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
        config.round_bonus
    }

    pub fn record_mistake(&mut self, config: &ScoringConfig) -> MistakeVerdict {
        self.score = self.score.saturating_sub(config.mistake_penalty);
        self.streak = 0;
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            MistakeVerdict::GameOver
        } else {
            MistakeVerdict::Retry {
                lives_left: self.lives,
            }
        }
    }

    /// Whether the last completed round reached the configured cap
    pub fn reached_cap(&self, config: &ScoringConfig) -> bool {
        config
            .max_rounds
            .is_some_and(|max| self.round.saturating_sub(1) >= max)
    }
}
