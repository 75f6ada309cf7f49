//! Session events and snapshots for the view layer
//!
//! The session never touches view state. Views drain [`SessionEvent`]s after
//! each call into the engine, or read a [`SessionSnapshot`] to redraw.

use serde::{Deserialize, Serialize};

use crate::planner::RoundPlan;
use crate::token::Token;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    Menu,
    Presenting,
    AwaitingInput,
    RoundComplete,
    GameOver,
}

impl GameState {
    /// A session is in progress (started and not yet ended)
    pub fn is_running(self) -> bool {
        matches!(
            self,
            GameState::Presenting | GameState::AwaitingInput | GameState::RoundComplete
        )
    }
}

/// Something the view may want to react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new session began at round 1
    Started,
    /// A round was planned and its presentation begins
    RoundStarted { round: u32, plan: RoundPlan },
    /// Light up a token
    TokenShown { index: usize, token: Token },
    /// Turn the lit token off
    TokenHidden { index: usize },
    /// Presentation finished; recall may begin
    AwaitingInput { round: u32 },
    /// Selection matched
    InputAccepted {
        token: Token,
        progress: usize,
        length: usize,
    },
    /// Selection did not match
    InputWrong { expected: Token, got: Token },
    /// Whole sequence reproduced
    RoundCompleted {
        round: u32,
        score: u32,
        bonus: u32,
        streak: u32,
    },
    /// Wrong input with lives left; the round will be replayed
    RoundFailed { round: u32, lives_left: u32 },
    /// No lives left; final results
    GameOver { score: u32, round: u32 },
    /// Round cap reached; back to the menu
    Finished { score: u32, rounds: u32 },
    /// Session abandoned by the player
    Exited { score: u32, round: u32 },
}

/// Point-in-time view of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: GameState,
    pub score: u32,
    pub round: u32,
    pub lives: u32,
    pub streak: u32,
    pub best_streak: u32,
    /// Token currently lit during presentation
    pub lit: Option<Token>,
    /// Tokens recalled so far in the current round
    pub progress: usize,
    /// Length of the current round's sequence (0 between rounds)
    pub sequence_length: usize,
    /// Engine clock in milliseconds
    pub elapsed_ms: u64,
}
