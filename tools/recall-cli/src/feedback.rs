//! Terminal bell feedback
//!
//! The terminal has no speaker to drive, so cues are rendered as the ASCII
//! bell: one ring for a wrong selection, none for the rest.

use std::io::Write;
use std::time::Duration;

use recall_core::{Cue, Feedback, FeedbackChannel};

const BEL: &[u8] = b"\x07";

/// Rings the bell on `out` for wrong selections
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Feedback for TerminalBell<W> {
    fn pulse(&mut self, cue: Cue, _duration: Duration) {
        if cue == Cue::Wrong {
            let result = self.out.write_all(BEL).and_then(|()| self.out.flush());
            if let Err(e) = result {
                tracing::trace!("bell failed: {e}");
            }
        }
    }
}

/// Channel that opens a stderr bell on first use
pub fn bell_channel() -> FeedbackChannel {
    FeedbackChannel::new(|| {
        tracing::debug!("opening terminal bell");
        let bell: Box<dyn Feedback> = Box::new(TerminalBell::new(std::io::stderr()));
        Ok(bell)
    })
}
