//! Session reporting tracker
//!
//! Collects what the engine reports through [`SessionTracker`] into a
//! [`SessionReport`] for printing. Nothing is persisted.

use chrono::{DateTime, Utc};
use recall_core::SessionTracker;
use serde::Serialize;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    GameOver,
    Finished,
    Exited,
}

/// Summary of one session
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub seed: u64,
    pub score: u32,
    pub round: u32,
    pub correct: u32,
    pub wrong: u32,
    pub ending: Option<Ending>,
    /// Engine time spent, including presentation and pauses
    pub game_time_ms: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionReport {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            score: 0,
            round: 0,
            correct: 0,
            wrong: 0,
            ending: None,
            game_time_ms: 0,
            started_at: None,
            ended_at: None,
        }
    }

    /// Fraction of submitted tokens that were correct
    pub fn accuracy(&self) -> f64 {
        let total = self.correct + self.wrong;
        if total == 0 {
            0.0
        } else {
            self.correct as f64 / total as f64
        }
    }
}

/// [`SessionTracker`] that fills a [`SessionReport`]
#[derive(Debug)]
pub struct ReportTracker {
    pub report: SessionReport,
    ended: bool,
}

impl ReportTracker {
    pub fn new(seed: u64) -> Self {
        Self {
            report: SessionReport::new(seed),
            ended: false,
        }
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }
}

impl SessionTracker for ReportTracker {
    fn on_session_start(&mut self) {
        self.report = SessionReport::new(self.report.seed);
        self.report.started_at = Some(Utc::now());
        self.ended = false;
    }

    fn on_session_end(&mut self, final_score: u32, final_round: u32) {
        self.report.score = final_score;
        self.report.round = final_round;
        self.report.ended_at = Some(Utc::now());
        self.ended = true;
        tracing::debug!(final_score, final_round, "session reported");
    }

    fn on_correct_input(&mut self) {
        self.report.correct += 1;
    }

    fn on_wrong_input(&mut self) {
        self.report.wrong += 1;
    }
}
