//! Scoring and progression state machine
//!
//! ```text
//! Menu ──start──▶ Presenting ──presentation done──▶ AwaitingInput
//!                    ▲                                 │      │
//!                    │ pause elapsed            complete│      │wrong, no lives
//!                    │                                 ▼      ▼
//!                    └──────────────────────── RoundComplete  GameOver
//!                                       (cap reached ─▶ Menu)    │
//!                    ▲                                           │
//!                    └──────────────────restart──────────────────┘
//! ```
//!
//! The session exclusively owns its score, round counter, current round and
//! timers. Only the transition functions below and [`Session::submit`] mutate
//! them. Time only moves through [`Session::advance`].

use std::time::Duration;

use crate::config::EngineConfig;
use crate::error::{ConfigError, SubmitError, TransitionError};
use crate::feedback::{Cue, FeedbackChannel};
use crate::generator::SequenceSource;
use crate::planner::DifficultyPlanner;
use crate::presentation::{Presentation, PresentationSink};
use crate::round::{InputStatus, Round, SubmitResult};
use crate::scoring::{MistakeVerdict, Scoreboard};
use crate::timer::Timer;
use crate::token::{Alphabet, Token};
use crate::tracker::SessionTracker;

mod events;


pub use events::{GameState, SessionEvent, SessionSnapshot};

/// What the post-round pause leads to
#[derive(Debug, Clone)]
enum AfterPause {
    /// Plan and generate the next round
    NextRound,
    /// Replay the failed round's sequence
    Retry(Round),
    /// Round cap reached; end the session
    Finish,
}

/// One play-through from start to game over
pub struct Session<S: SequenceSource, T: SessionTracker> {
    config: EngineConfig,
    alphabet: Alphabet,
    planner: DifficultyPlanner,
    source: S,
    tracker: T,
    feedback: FeedbackChannel,
    state: GameState,
    board: Scoreboard,
    round: Option<Round>,
    presentation: Option<Presentation>,
    pause: Timer,
    after_pause: AfterPause,
    now: Duration,
    events: Vec<SessionEvent>,
}

/// Routes presentation steps to the event queue and feedback output
struct PresentationHooks<'a> {
    events: &'a mut Vec<SessionEvent>,
    feedback: &'a mut FeedbackChannel,
    show: Duration,
    completed: bool,
}

impl PresentationSink for PresentationHooks<'_> {
    fn token_shown(&mut self, index: usize, token: Token) {
        self.feedback.pulse(Cue::Token(token), self.show);
        self.events.push(SessionEvent::TokenShown { index, token });
    }

    fn token_hidden(&mut self, index: usize) {
        self.feedback.silence();
        self.events.push(SessionEvent::TokenHidden { index });
    }

    fn complete(&mut self) {
        self.completed = true;
    }
}

impl<S: SequenceSource, T: SessionTracker> Session<S, T> {
    /// Create a session in the menu state
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be played.
    pub fn new(config: EngineConfig, source: S, tracker: T) -> Result<Self, ConfigError> {
        let alphabet = config.validate()?;
        let board = Scoreboard::new(&config.scoring);
        Ok(Self {
            planner: DifficultyPlanner::new(config.planner.clone()),
            config,
            alphabet,
            source,
            tracker,
            feedback: FeedbackChannel::silent(),
            state: GameState::Menu,
            board,
            round: None,
            presentation: None,
            pause: Timer::new(),
            after_pause: AfterPause::NextRound,
            now: Duration::ZERO,
            events: Vec::new(),
        })
    }

    /// Attach a feedback output channel
    pub fn with_feedback(mut self, feedback: FeedbackChannel) -> Self {
        self.feedback = feedback;
        self
    }

    // ========================================================================
    // Player actions
    // ========================================================================

    /// Start a session from the menu, or restart after game over
    ///
    /// Resets to round 1 with zero score and presents the first round.
    pub fn start(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.state, GameState::Menu | GameState::GameOver) {
            return Err(TransitionError {
                from: self.state,
                action: "start",
            });
        }

        self.board = Scoreboard::new(&self.config.scoring);
        self.tracker.on_session_start();
        self.events.push(SessionEvent::Started);
        tracing::info!(alphabet = self.alphabet.size(), "session started");

        let round = self.plan_round();
        self.begin_round(round, self.now);
        Ok(())
    }

    /// Abandon any running session and start over at round 1
    pub fn restart(&mut self) {
        self.exit();
        // exit() always lands in Menu, from which start cannot fail
        let _ = self.start();
    }

    /// Leave to the menu, cancelling every pending timer
    ///
    /// A running session is reported as ended with its current score and round.
    pub fn exit(&mut self) {
        if self.state.is_running() {
            let (score, round) = (self.board.score, self.board.round);
            self.tracker.on_session_end(score, round);
            self.events.push(SessionEvent::Exited { score, round });
            tracing::info!(score, round, "session exited");
        }
        self.teardown();
        self.state = GameState::Menu;
    }

    /// Submit one selection during recall
    ///
    /// # Errors
    ///
    /// Selections outside [`GameState::AwaitingInput`] and tokens outside the
    /// alphabet are refused without touching session state.
    pub fn submit(&mut self, token: Token) -> Result<SubmitResult, SubmitError> {
        if self.state != GameState::AwaitingInput {
            tracing::debug!(state = ?self.state, %token, "input ignored");
            return Err(SubmitError::NotAcceptingInput(self.state));
        }
        if !self.alphabet.contains(token) {
            tracing::warn!(%token, "token outside alphabet");
            return Err(SubmitError::UnknownToken(token));
        }
        let round = self.round.as_mut().ok_or(SubmitError::RoundResolved)?;
        let expected = round.expected();
        let result = round.submit(token)?;
        let (progress, length) = (round.input().len(), round.sequence().len());
        let pulse = Duration::from_millis(self.config.game.feedback_pulse_ms as u64);

        match result.status {
            InputStatus::Correct => {
                self.board.credit_token(&self.config.scoring);
                self.tracker.on_correct_input();
                self.feedback.pulse(Cue::Correct, pulse);
                self.events.push(SessionEvent::InputAccepted {
                    token,
                    progress,
                    length,
                });
                if result.round_complete {
                    self.complete_round();
                }
            }
            InputStatus::Wrong => {
                self.tracker.on_wrong_input();
                self.feedback.pulse(Cue::Wrong, pulse);
                if let Some(expected) = expected {
                    self.events.push(SessionEvent::InputWrong {
                        expected,
                        got: token,
                    });
                }
                self.fail_round();
            }
        }
        Ok(result)
    }

    /// Move the engine clock forward, firing every timer that comes due
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
        loop {
            match self.state {
                GameState::Presenting => {
                    if !self.step_presentation() {
                        break;
                    }
                }
                GameState::RoundComplete => match self.pause.fire_if_due(self.now) {
                    Some(at) => self.resolve_pause(at),
                    None => break,
                },
                GameState::Menu | GameState::AwaitingInput | GameState::GameOver => break,
            }
        }
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn plan_round(&mut self) -> Round {
        let number = self.board.round;
        let plan = self.planner.plan(number);
        let sequence = self.source.next_sequence(plan.sequence_length, self.alphabet);
        Round::new(number, plan, sequence)
    }

    /// Enter Presenting with `round`, showing its first token at `at`
    fn begin_round(&mut self, round: Round, at: Duration) {
        let plan = *round.plan();
        tracing::debug!(
            round = round.number(),
            length = plan.sequence_length,
            speed_ms = plan.presentation_speed_ms,
            delay_ms = plan.inter_item_delay_ms,
            "presenting round"
        );
        self.events.push(SessionEvent::RoundStarted {
            round: round.number(),
            plan,
        });

        let mut presentation = Presentation::from_plan(round.sequence().into(), &plan);
        self.round = Some(round);
        self.state = GameState::Presenting;

        let mut hooks = PresentationHooks {
            events: &mut self.events,
            feedback: &mut self.feedback,
            show: plan.show_duration(),
            completed: false,
        };
        presentation.start(at, &mut hooks);
        let completed = hooks.completed;
        self.presentation = Some(presentation);
        if completed {
            self.enter_awaiting_input();
        }
    }

    /// Returns true if the presentation finished and the state moved on
    fn step_presentation(&mut self) -> bool {
        let Some(presentation) = self.presentation.as_mut() else {
            return false;
        };
        let mut hooks = PresentationHooks {
            events: &mut self.events,
            feedback: &mut self.feedback,
            show: presentation.show_duration(),
            completed: false,
        };
        presentation.advance(self.now, &mut hooks);
        if hooks.completed {
            self.enter_awaiting_input();
            true
        } else {
            false
        }
    }

    fn enter_awaiting_input(&mut self) {
        self.presentation = None;
        self.state = GameState::AwaitingInput;
        tracing::debug!(round = self.board.round, "awaiting input");
        self.events.push(SessionEvent::AwaitingInput {
            round: self.board.round,
        });
    }

    fn complete_round(&mut self) {
        let completed = self.board.round;
        let bonus = self.board.complete_round(&self.config.scoring);
        self.round = None;
        self.after_pause = if self.board.reached_cap(&self.config.scoring) {
            AfterPause::Finish
        } else {
            AfterPause::NextRound
        };
        self.enter_round_complete();

        tracing::debug!(round = completed, score = self.board.score, "round complete");
        self.events.push(SessionEvent::RoundCompleted {
            round: completed,
            score: self.board.score,
            bonus,
            streak: self.board.streak,
        });
    }

    fn fail_round(&mut self) {
        let round = self.round.take();
        match self.board.record_mistake(&self.config.scoring) {
            MistakeVerdict::Retry { lives_left } => {
                let number = self.board.round;
                tracing::debug!(round = number, lives_left, "round failed");
                self.events.push(SessionEvent::RoundFailed {
                    round: number,
                    lives_left,
                });
                self.after_pause = match round {
                    Some(failed) => AfterPause::Retry(failed.retry()),
                    None => AfterPause::NextRound,
                };
                self.enter_round_complete();
            }
            MistakeVerdict::GameOver => self.enter_game_over(),
        }
    }

    fn enter_round_complete(&mut self) {
        self.state = GameState::RoundComplete;
        self.pause.arm(self.now + self.config.scoring.round_pause());
    }

    fn resolve_pause(&mut self, at: Duration) {
        match std::mem::replace(&mut self.after_pause, AfterPause::NextRound) {
            AfterPause::NextRound => {
                let round = self.plan_round();
                self.begin_round(round, at);
            }
            AfterPause::Retry(round) => self.begin_round(round, at),
            AfterPause::Finish => self.finish(),
        }
    }

    fn enter_game_over(&mut self) {
        let (score, round) = (self.board.score, self.board.round);
        self.teardown();
        self.state = GameState::GameOver;
        self.tracker.on_session_end(score, round);
        self.events.push(SessionEvent::GameOver { score, round });
        tracing::info!(score, round, "game over");
    }

    fn finish(&mut self) {
        let score = self.board.score;
        let rounds = self.board.round.saturating_sub(1);
        self.teardown();
        self.state = GameState::Menu;
        self.tracker.on_session_end(score, rounds);
        self.events.push(SessionEvent::Finished { score, rounds });
        tracing::info!(score, rounds, "session finished");
    }

    /// Cancel all timers and release the round and feedback output
    fn teardown(&mut self) {
        if let Some(mut presentation) = self.presentation.take() {
            presentation.cancel();
        }
        self.pause.cancel();
        self.after_pause = AfterPause::NextRound;
        self.round = None;
        self.feedback.dispose();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.board.score
    }

    /// Current (or, after game over, final) round number
    pub fn round_number(&self) -> u32 {
        self.board.round
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.board
    }

    /// Round being presented or recalled
    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Engine clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// When the next timer fires, if any is pending
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.state {
            GameState::Presenting => self.presentation.as_ref().and_then(|p| p.next_deadline()),
            GameState::RoundComplete => self.pause.deadline(),
            _ => None,
        }
    }

    /// Whether any timer is still armed
    pub fn has_pending_timer(&self) -> bool {
        self.pause.is_armed()
            || self
                .presentation
                .as_ref()
                .is_some_and(|p| p.next_deadline().is_some())
    }

    pub fn feedback(&self) -> &FeedbackChannel {
        &self.feedback
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let lit = self.presentation.as_ref().and_then(|p| p.lit());
        let (progress, sequence_length) = self
            .round
            .as_ref()
            .map(|r| (r.input().len(), r.sequence().len()))
            .unwrap_or((0, 0));
        SessionSnapshot {
            state: self.state,
            score: self.board.score,
            round: self.board.round,
            lives: self.board.lives,
            streak: self.board.streak,
            best_streak: self.board.best_streak,
            lit,
            progress,
            sequence_length,
            elapsed_ms: self.now.as_millis() as u64,
        }
    }
}

impl<S: SequenceSource, T: SessionTracker> std::fmt::Debug for Session<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("board", &self.board)
            .field("now", &self.now)
            .field("feedback", &self.feedback)
            .finish_non_exhaustive()
    }
}
