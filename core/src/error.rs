//! Engine error types

use std::path::PathBuf;

use thiserror::Error;

use crate::session::GameState;
use crate::token::{MAX_ALPHABET_SIZE, MIN_ALPHABET_SIZE, Token};

/// Configuration could not be loaded or is unplayable
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "alphabet size {0} out of range ({min}-{max})",
        min = MIN_ALPHABET_SIZE,
        max = MAX_ALPHABET_SIZE
    )]
    AlphabetSize(u8),

    #[error("lives must be at least 1")]
    NoLives,

    #[error("base presentation speed must be non-zero")]
    ZeroSpeed,

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// A selection was refused; session state is untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Input only counts while the session awaits recall
    #[error("input not accepted while {0:?}")]
    NotAcceptingInput(GameState),

    /// Token is not part of the alphabet in play
    #[error("token {0} is not in the alphabet")]
    UnknownToken(Token),

    /// The round already has an outcome
    #[error("round already resolved")]
    RoundResolved,
}

/// A lifecycle action was requested from the wrong state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} while {from:?}")]
pub struct TransitionError {
    pub from: GameState,
    pub action: &'static str,
}

/// Feedback output could not be opened
#[derive(Debug, Error)]
#[error("feedback output unavailable: {0}")]
pub struct FeedbackError(pub String);
