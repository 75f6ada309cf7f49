//! Shared test utilities for integration and unit tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::feedback::{Cue, Feedback, FeedbackChannel};
use crate::generator::SequenceSource;
use crate::session::Session;
use crate::token::{Alphabet, Sequence, Token};
use crate::tracker::SessionTracker;

// ============================================================================
// Scripted sequence source
// ============================================================================

/// Hands out pre-written sequences, truncated or padded to the planned length
#[derive(Debug, Default)]
pub struct ScriptedSequences {
    script: VecDeque<Vec<u8>>,
    pub requested: Vec<usize>,
}

impl ScriptedSequences {
    pub fn new(script: &[&[u8]]) -> Self {
        Self {
            script: script.iter().map(|s| s.to_vec()).collect(),
            requested: Vec::new(),
        }
    }
}

impl SequenceSource for ScriptedSequences {
    fn next_sequence(&mut self, length: usize, _alphabet: Alphabet) -> Sequence {
        self.requested.push(length);
        let tokens = self.script.pop_front().unwrap_or_default();
        (0..length)
            .map(|i| Token(tokens.get(i).copied().unwrap_or(0)))
            .collect()
    }
}

// ============================================================================
// Recording tracker
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCall {
    Start,
    End { score: u32, round: u32 },
    Correct,
    Wrong,
}

#[derive(Debug, Default)]
pub struct RecordingTracker {
    pub calls: Vec<TrackerCall>,
}

impl RecordingTracker {
    pub fn ends(&self) -> Vec<TrackerCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, TrackerCall::End { .. }))
            .copied()
            .collect()
    }

    pub fn count(&self, call: TrackerCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl SessionTracker for RecordingTracker {
    fn on_session_start(&mut self) {
        self.calls.push(TrackerCall::Start);
    }
    fn on_session_end(&mut self, final_score: u32, final_round: u32) {
        self.calls.push(TrackerCall::End {
            score: final_score,
            round: final_round,
        });
    }
    fn on_correct_input(&mut self) {
        self.calls.push(TrackerCall::Correct);
    }
    fn on_wrong_input(&mut self) {
        self.calls.push(TrackerCall::Wrong);
    }
}

// ============================================================================
// Test feedback output
// ============================================================================

#[derive(Debug, Default)]
struct FeedbackLogInner {
    cues: Vec<Cue>,
    silenced: u32,
}

/// Shared log of everything a [`TestFeedback`] output received
#[derive(Debug, Clone, Default)]
pub struct TestFeedbackLog(Rc<RefCell<FeedbackLogInner>>);

impl TestFeedbackLog {
    pub fn cues(&self) -> Vec<Cue> {
        self.0.borrow().cues.clone()
    }

    pub fn silenced(&self) -> u32 {
        self.0.borrow().silenced
    }
}

pub struct TestFeedback {
    log: TestFeedbackLog,
}

impl TestFeedback {
    /// Channel whose outputs write into `log`
    pub fn channel(log: &TestFeedbackLog) -> FeedbackChannel {
        let log = log.clone();
        FeedbackChannel::new(move || {
            Ok(Box::new(TestFeedback { log: log.clone() }) as Box<dyn Feedback>)
        })
    }
}

impl Feedback for TestFeedback {
    fn pulse(&mut self, cue: Cue, _duration: Duration) {
        self.log.0.borrow_mut().cues.push(cue);
    }
    fn silence(&mut self) {
        self.log.0.borrow_mut().silenced += 1;
    }
}

// ============================================================================
// Session helpers
// ============================================================================

pub type TestSession = Session<ScriptedSequences, RecordingTracker>;

/// Three-letter alphabet with the default curve (round 1 has length 3)
pub fn abc_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.game.alphabet_size = 3;
    config
}

pub fn scripted_session(config: EngineConfig, script: &[&[u8]]) -> TestSession {
    Session::new(config, ScriptedSequences::new(script), RecordingTracker::default()).unwrap()
}

/// Advance until the session leaves the presentation phase
pub fn finish_presentation(session: &mut TestSession) {
    if let Some(round) = session.current_round() {
        let total = round.plan().presentation_time();
        session.advance(total);
    }
}

/// Submit the current round's sequence in full
pub fn replay_sequence(session: &mut TestSession) {
    let sequence: Vec<Token> = session
        .current_round()
        .map(|r| r.sequence().to_vec())
        .unwrap_or_default();
    for token in sequence {
        session.submit(token).unwrap();
    }
}

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}
