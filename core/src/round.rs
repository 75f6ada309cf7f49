//! One present-then-recall cycle and its input collector
//!
//! Each submitted token is checked against the sequence position it fills,
//! immediately. The first mismatch resolves the round as a failure and
//! nothing more is accepted.

use serde::{Deserialize, Serialize};

use crate::error::SubmitError;
use crate::planner::RoundPlan;
use crate::token::{Sequence, Token};

/// Round resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    InProgress,
    Success,
    Failure,
}

/// Verdict on one submitted token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputStatus {
    Correct,
    Wrong,
}

/// Result of [`Round::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub status: InputStatus,
    pub round_complete: bool,
}

#[derive(Debug, Clone)]
pub struct Round {
    number: u32,
    plan: RoundPlan,
    sequence: Sequence,
    input: Sequence,
    outcome: RoundOutcome,
}

impl Round {
    pub fn new(number: u32, plan: RoundPlan, sequence: Sequence) -> Self {
        Self {
            number,
            plan,
            sequence,
            input: Sequence::new(),
            outcome: RoundOutcome::InProgress,
        }
    }

    /// Fresh attempt at the same sequence
    pub fn retry(&self) -> Self {
        Self::new(self.number, self.plan, self.sequence.clone())
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn plan(&self) -> &RoundPlan {
        &self.plan
    }

    pub fn sequence(&self) -> &[Token] {
        &self.sequence
    }

    pub fn input(&self) -> &[Token] {
        &self.input
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// Token the player must enter next
    pub fn expected(&self) -> Option<Token> {
        match self.outcome {
            RoundOutcome::InProgress => self.sequence.get(self.input.len()).copied(),
            _ => None,
        }
    }

    /// Validate one selection against the next sequence position
    ///
    /// # Errors
    ///
    /// [`SubmitError::RoundResolved`] once the round has an outcome.
    pub fn submit(&mut self, token: Token) -> Result<SubmitResult, SubmitError> {
        let Some(expected) = self.expected() else {
            return Err(SubmitError::RoundResolved);
        };

        if token != expected {
            self.outcome = RoundOutcome::Failure;
            return Ok(SubmitResult {
                status: InputStatus::Wrong,
                round_complete: false,
            });
        }

        self.input.push(token);
        let round_complete = self.input.len() == self.sequence.len();
        if round_complete {
            self.outcome = RoundOutcome::Success;
        }
        Ok(SubmitResult {
            status: InputStatus::Correct,
            round_complete,
        })
    }
}
