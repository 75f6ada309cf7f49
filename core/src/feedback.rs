//! Audio/visual feedback output
//!
//! Output devices are expensive to open and must not outlive the session that
//! uses them. A [`FeedbackChannel`] owns the factory and the opened output:
//! the output is created on the first pulse and closed by [`FeedbackChannel::dispose`].
//! If opening fails the channel stays silent for the rest of the session.

use std::fmt;
use std::time::Duration;

use crate::error::FeedbackError;
use crate::token::Token;

/// What the output should signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A presented token (tone per symbol)
    Token(Token),
    /// Correct selection during recall
    Correct,
    /// Wrong selection during recall
    Wrong,
}

/// An opened feedback device
pub trait Feedback {
    /// Start a cue lasting roughly `duration`
    fn pulse(&mut self, cue: Cue, duration: Duration);

    /// Cut any sounding cue
    fn silence(&mut self) {}
}

type FeedbackFactory = Box<dyn FnMut() -> Result<Box<dyn Feedback>, FeedbackError>>;

#[derive(Default)]
enum Slot {
    /// Not opened yet
    #[default]
    Closed,
    Open(Box<dyn Feedback>),
    /// Opening failed; stay silent until disposed
    Unavailable,
}

/// Lazily opened, explicitly disposed feedback output
pub struct FeedbackChannel {
    factory: Option<FeedbackFactory>,
    slot: Slot,
    opened: u32,
}

impl FeedbackChannel {
    /// Channel that opens its output with `factory` on first use
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> Result<Box<dyn Feedback>, FeedbackError> + 'static,
    {
        Self {
            factory: Some(Box::new(factory)),
            slot: Slot::Closed,
            opened: 0,
        }
    }

    /// Channel with no output at all
    pub fn silent() -> Self {
        Self {
            factory: None,
            slot: Slot::Closed,
            opened: 0,
        }
    }

    pub fn pulse(&mut self, cue: Cue, duration: Duration) {
        if let Some(output) = self.output() {
            output.pulse(cue, duration);
        }
    }

    pub fn silence(&mut self) {
        if let Slot::Open(output) = &mut self.slot {
            output.silence();
        }
    }

    /// Close the output; the next pulse reopens it
    pub fn dispose(&mut self) {
        if let Slot::Open(mut output) = std::mem::take(&mut self.slot) {
            output.silence();
            tracing::debug!("feedback output closed");
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.slot, Slot::Open(_))
    }

    /// How many times an output has been opened
    pub fn open_count(&self) -> u32 {
        self.opened
    }

    fn output(&mut self) -> Option<&mut Box<dyn Feedback>> {
        if matches!(self.slot, Slot::Closed) {
            let factory = self.factory.as_mut()?;
            self.slot = match factory() {
                Ok(output) => {
                    self.opened += 1;
                    tracing::debug!("feedback output opened");
                    Slot::Open(output)
                }
                Err(e) => {
                    tracing::warn!("{e}; continuing without feedback");
                    Slot::Unavailable
                }
            };
        }
        match &mut self.slot {
            Slot::Open(output) => Some(output),
            _ => None,
        }
    }
}

impl Default for FeedbackChannel {
    fn default() -> Self {
        Self::silent()
    }
}

impl fmt::Debug for FeedbackChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = match self.slot {
            Slot::Closed => "closed",
            Slot::Open(_) => "open",
            Slot::Unavailable => "unavailable",
        };
        f.debug_struct("FeedbackChannel")
            .field("has_factory", &self.factory.is_some())
            .field("slot", &slot)
            .field("opened", &self.opened)
            .finish()
    }
}
