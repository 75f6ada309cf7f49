//! Session tracking collaborator
//!
//! The surrounding application implements [`SessionTracker`] to record
//! progress, drive analytics or play feedback sounds. The engine calls it
//! synchronously from its transition functions.

/// External observer of session lifecycle and input outcomes
pub trait SessionTracker {
    /// A session began (menu or game over into the first presentation)
    fn on_session_start(&mut self);

    /// The session ended; called exactly once per started session
    fn on_session_end(&mut self, final_score: u32, final_round: u32);

    /// A submitted token matched
    fn on_correct_input(&mut self) {}

    /// A submitted token did not match
    fn on_wrong_input(&mut self) {}
}

/// Tracker that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracker;

impl SessionTracker for NullTracker {
    fn on_session_start(&mut self) {}
    fn on_session_end(&mut self, _final_score: u32, _final_round: u32) {}
}

impl<T: SessionTracker + ?Sized> SessionTracker for &mut T {
    fn on_session_start(&mut self) {
        (**self).on_session_start();
    }
    fn on_session_end(&mut self, final_score: u32, final_round: u32) {
        (**self).on_session_end(final_score, final_round);
    }
    fn on_correct_input(&mut self) {
        (**self).on_correct_input();
    }
    fn on_wrong_input(&mut self) {
        (**self).on_wrong_input();
    }
}

impl<T: SessionTracker + ?Sized> SessionTracker for Box<T> {
    fn on_session_start(&mut self) {
        (**self).on_session_start();
    }
    fn on_session_end(&mut self, final_score: u32, final_round: u32) {
        (**self).on_session_end(final_score, final_round);
    }
    fn on_correct_input(&mut self) {
        (**self).on_correct_input();
    }
    fn on_wrong_input(&mut self) {
        (**self).on_wrong_input();
    }
}
