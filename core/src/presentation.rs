//! Presentation driver
//!
//! Plays a sequence back one token at a time: show, hold for the lit time,
//! hide, hold for the gap, next token. After the last gap the driver
//! completes exactly once. The whole pending schedule lives in one [`Timer`],
//! so cancelling is a single call.

use std::time::Duration;

use crate::planner::RoundPlan;
use crate::timer::Timer;
use crate::token::{Sequence, Token};

/// Receives presentation steps
pub trait PresentationSink {
    fn token_shown(&mut self, index: usize, token: Token);
    fn token_hidden(&mut self, index: usize);
    fn complete(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Not started yet
    Idle,
    /// Token `index` is lit
    Showing(usize),
    /// Token `index` went dark, waiting for the gap to pass
    Gap(usize),
    Done,
    Cancelled,
}

/// Sequential, cancelable playback of one round's sequence
#[derive(Debug, Clone)]
pub struct Presentation {
    sequence: Sequence,
    show: Duration,
    gap: Duration,
    phase: Phase,
    timer: Timer,
}

impl Presentation {
    pub fn new(sequence: Sequence, show: Duration, gap: Duration) -> Self {
        Self {
            sequence,
            show,
            gap,
            phase: Phase::Idle,
            timer: Timer::new(),
        }
    }

    /// Build a presentation using a plan's timings
    pub fn from_plan(sequence: Sequence, plan: &RoundPlan) -> Self {
        Self::new(sequence, plan.show_duration(), plan.gap_duration())
    }

    /// Begin playback at `at`: the first token is shown immediately
    ///
    /// Has no effect unless the presentation is idle.
    pub fn start(&mut self, at: Duration, sink: &mut impl PresentationSink) {
        if self.phase != Phase::Idle {
            return;
        }
        if self.sequence.is_empty() {
            self.finish(sink);
            return;
        }
        self.show_token(0, at, sink);
    }

    /// Fire every step that is due at `now`, in order
    pub fn advance(&mut self, now: Duration, sink: &mut impl PresentationSink) {
        while let Some(at) = self.timer.fire_if_due(now) {
            match self.phase {
                Phase::Showing(index) => {
                    sink.token_hidden(index);
                    self.phase = Phase::Gap(index);
                    self.timer.arm(at + self.gap);
                }
                Phase::Gap(index) if index + 1 < self.sequence.len() => {
                    self.show_token(index + 1, at, sink);
                }
                Phase::Gap(_) => self.finish(sink),
                Phase::Idle | Phase::Done | Phase::Cancelled => {}
            }
        }
    }

    /// Stop playback; no further sink calls will be made
    pub fn cancel(&mut self) {
        self.timer.cancel();
        if !matches!(self.phase, Phase::Done) {
            self.phase = Phase::Cancelled;
        }
    }

    /// Token currently lit, if any
    pub fn lit(&self) -> Option<Token> {
        match self.phase {
            Phase::Showing(index) => self.sequence.get(index).copied(),
            _ => None,
        }
    }

    /// How long each token stays lit
    pub fn show_duration(&self) -> Duration {
        self.show
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase == Phase::Cancelled
    }

    /// When the next step fires, if one is pending
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    fn show_token(&mut self, index: usize, at: Duration, sink: &mut impl PresentationSink) {
        self.phase = Phase::Showing(index);
        sink.token_shown(index, self.sequence[index]);
        self.timer.arm(at + self.show);
    }

    fn finish(&mut self, sink: &mut impl PresentationSink) {
        self.phase = Phase::Done;
        self.timer.cancel();
        sink.complete();
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Step {
        Shown(usize, Token),
        Hidden(usize),
        Complete,
    }

    #[derive(Default)]
    struct Recorder {
        steps: Vec<Step>,
    }

    impl PresentationSink for Recorder {
        fn token_shown(&mut self, index: usize, token: Token) {
            self.steps.push(Step::Shown(index, token));
        }
        fn token_hidden(&mut self, index: usize) {
            self.steps.push(Step::Hidden(index));
        }
        fn complete(&mut self) {
            self.steps.push(Step::Complete);
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn aba() -> Presentation {
        Presentation::new(smallvec![Token(0), Token(1), Token(0)], ms(100), ms(50))
    }

    #[test]
    fn test_full_playback_order() {
        let mut presentation = aba();
        let mut sink = Recorder::default();
        presentation.start(ms(0), &mut sink);
        assert_eq!(sink.steps, vec![Step::Shown(0, Token(0))]);
        assert_eq!(presentation.lit(), Some(Token(0)));

        presentation.advance(ms(450), &mut sink);
        assert_eq!(
            sink.steps,
            vec![
                Step::Shown(0, Token(0)),
                Step::Hidden(0),
                Step::Shown(1, Token(1)),
                Step::Hidden(1),
                Step::Shown(2, Token(0)),
                Step::Hidden(2),
                Step::Complete,
            ]
        );
        assert!(presentation.is_complete());
        assert_eq!(presentation.lit(), None);
    }

    #[test]
    fn test_step_timing() {
        let mut presentation = aba();
        let mut sink = Recorder::default();
        presentation.start(ms(0), &mut sink);

        presentation.advance(ms(99), &mut sink);
        assert_eq!(sink.steps.len(), 1);
        presentation.advance(ms(100), &mut sink);
        assert_eq!(sink.steps.last(), Some(&Step::Hidden(0)));
        presentation.advance(ms(149), &mut sink);
        assert_eq!(sink.steps.len(), 2);
        presentation.advance(ms(150), &mut sink);
        assert_eq!(sink.steps.last(), Some(&Step::Shown(1, Token(1))));
        assert_eq!(presentation.next_deadline(), Some(ms(250)));
    }

    #[test]
    fn test_sliced_advance_matches_single_advance() {
        let mut sliced = aba();
        let mut sliced_sink = Recorder::default();
        sliced.start(ms(0), &mut sliced_sink);
        for t in (0..=450).step_by(7) {
            sliced.advance(ms(t), &mut sliced_sink);
        }
        sliced.advance(ms(450), &mut sliced_sink);

        let mut whole = aba();
        let mut whole_sink = Recorder::default();
        whole.start(ms(0), &mut whole_sink);
        whole.advance(ms(10_000), &mut whole_sink);

        assert_eq!(sliced_sink.steps, whole_sink.steps);
    }

    #[test]
    fn test_complete_fires_once() {
        let mut presentation = aba();
        let mut sink = Recorder::default();
        presentation.start(ms(0), &mut sink);
        presentation.advance(ms(1000), &mut sink);
        presentation.advance(ms(2000), &mut sink);
        presentation.start(ms(3000), &mut sink);
        let completes = sink.steps.iter().filter(|s| **s == Step::Complete).count();
        assert_eq!(completes, 1);
    }

    #[test]
    fn test_cancel_silences_pending_steps() {
        let mut presentation = aba();
        let mut sink = Recorder::default();
        presentation.start(ms(0), &mut sink);
        presentation.advance(ms(120), &mut sink);
        presentation.cancel();
        let before = sink.steps.clone();

        presentation.advance(ms(10_000), &mut sink);
        assert_eq!(sink.steps, before);
        assert!(presentation.is_cancelled());
        assert_eq!(presentation.next_deadline(), None);
    }

    #[test]
    fn test_empty_sequence_completes_on_start() {
        let mut presentation = Presentation::new(Sequence::new(), ms(100), ms(50));
        let mut sink = Recorder::default();
        presentation.start(ms(0), &mut sink);
        assert_eq!(sink.steps, vec![Step::Complete]);
    }
}
