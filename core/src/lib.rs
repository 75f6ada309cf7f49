//! Recall Core - sequence-replication memory game engine
//!
//! Simon-style games: a sequence of tokens is presented, the player repeats
//! it, and each success makes the next sequence longer and faster.
//!
//! # Architecture
//!
//! - [`DifficultyPlanner`] - Round number to length and timing
//! - [`generate`] / [`SequenceSource`] - Seeded token sequences
//! - [`Presentation`] - Cancelable, timer-driven playback
//! - [`Round`] - Input collector with immediate validation
//! - [`Session`] - Scoring and progression state machine
//! - [`Runtime`] - Drives a session from the wall clock
//!
//! The engine is single-threaded and runs on virtual time: nothing happens
//! between calls to [`Session::advance`] and [`Session::submit`].

pub mod config;
pub mod error;
pub mod feedback;
pub mod generator;
#[cfg(test)]
mod integration;
pub mod planner;
pub mod presentation;
pub mod round;
pub mod runtime;
pub mod scoring;
pub mod session;
#[cfg(test)]
pub mod test_utils;
pub mod timer;
pub mod token;
pub mod tracker;

pub use config::{EngineConfig, GameConfig};
pub use error::{ConfigError, FeedbackError, SubmitError, TransitionError};
pub use feedback::{Cue, Feedback, FeedbackChannel};
pub use generator::{RandomSequences, SequenceSource, generate};
pub use planner::{DifficultyPlanner, PlannerConfig, RoundPlan};
pub use presentation::{Presentation, PresentationSink};
pub use round::{InputStatus, Round, RoundOutcome, SubmitResult};
pub use runtime::{Runtime, RuntimeConfig};
pub use scoring::{MistakeVerdict, Scoreboard, ScoringConfig};
pub use session::{GameState, Session, SessionEvent, SessionSnapshot};
pub use timer::Timer;
pub use token::{Alphabet, Sequence, Token, format_sequence};
pub use tracker::{NullTracker, SessionTracker};
