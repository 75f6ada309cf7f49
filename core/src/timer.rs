//! Single cancelable timer slot
//!
//! Timers are deadlines on the session's virtual clock, never stored callbacks.
//! Whoever owns a [`Timer`] decides what firing means, so a cancelled or
//! dropped timer has nothing left that could run.

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    /// Unarmed timer
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm (or re-arm) to fire at `at`, replacing any pending deadline
    pub fn arm(&mut self, at: Duration) {
        self.deadline = Some(at);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Disarm and return the deadline if it is due at `now`
    ///
    /// Successors should be scheduled from the returned deadline, not from
    /// `now`, so results do not depend on how time was sliced.
    pub fn fire_if_due(&mut self, now: Duration) -> Option<Duration> {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                Some(at)
            }
            _ => None,
        }
    }
}
