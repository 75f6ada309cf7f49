//! End-to-end scenarios across planner, generator, presentation and session

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::EngineConfig;
use crate::generator::RandomSequences;
use crate::session::{GameState, Session, SessionEvent};
use crate::test_utils::{
    RecordingTracker, TrackerCall, abc_config, finish_presentation, ms, replay_sequence,
    scripted_session,
};
use crate::token::Token;
use crate::tracker::NullTracker;

// ============================================================================
// Worked example: ABA on a three-letter board
// ============================================================================

#[test]
fn test_worked_example_success() {
    let mut session = scripted_session(abc_config(), &[&[0, 1, 0]]);
    session.start().unwrap();
    assert_eq!(
        session.current_round().unwrap().plan().sequence_length,
        3
    );
    finish_presentation(&mut session);

    for token in [Token(0), Token(1), Token(0)] {
        session.submit(token).unwrap();
    }
    assert_eq!(session.score(), 80);
    assert_eq!(session.round_number(), 2);
}

#[test]
fn test_worked_example_failure() {
    let mut session = scripted_session(abc_config(), &[&[0, 1, 0]]);
    session.start().unwrap();
    finish_presentation(&mut session);

    session.submit(Token(0)).unwrap();
    session.submit(Token(1)).unwrap();
    session.submit(Token(2)).unwrap();
    assert_eq!(session.state(), GameState::GameOver);
    assert_eq!(
        session.tracker().ends(),
        vec![TrackerCall::End {
            score: 20,
            round: 1
        }]
    );
}

// ============================================================================
// Seeded sessions
// ============================================================================

fn seeded_session(seed: u64) -> Session<RandomSequences<Pcg32>, RecordingTracker> {
    Session::new(
        EngineConfig::default(),
        RandomSequences::new(Pcg32::seed_from_u64(seed)),
        RecordingTracker::default(),
    )
    .unwrap()
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let mut a = seeded_session(1234);
    let mut b = seeded_session(1234);
    a.start().unwrap();
    b.start().unwrap();

    for _ in 0..5 {
        let seq_a = a.current_round().unwrap().sequence().to_vec();
        let seq_b = b.current_round().unwrap().sequence().to_vec();
        assert_eq!(seq_a, seq_b);

        for session in [&mut a, &mut b] {
            let total = session.current_round().unwrap().plan().presentation_time();
            session.advance(total);
            for token in session.current_round().unwrap().sequence().to_vec() {
                session.submit(token).unwrap();
            }
            session.advance(ms(1000));
        }
    }
    assert_eq!(a.drain_events(), b.drain_events());
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_perfect_play_reaches_length_cap() {
    let mut session = seeded_session(99);
    session.start().unwrap();

    let mut expected_score = 0;
    for round in 1..=15u32 {
        let length = session.current_round().unwrap().sequence().len();
        assert_eq!(length, (2 + round as usize).min(12));
        let total = session.current_round().unwrap().plan().presentation_time();
        session.advance(total);
        for token in session.current_round().unwrap().sequence().to_vec() {
            session.submit(token).unwrap();
        }
        expected_score += length as u32 * 10 + 50;
        assert_eq!(session.score(), expected_score);
        assert_eq!(session.round_number(), round + 1);
        session.advance(ms(1000));
    }
    assert_eq!(session.scoreboard().streak, 15);
}

#[test]
fn test_event_stream_for_one_round() {
    let mut session = scripted_session(abc_config(), &[&[2, 0, 2]]);
    session.start().unwrap();
    finish_presentation(&mut session);
    replay_sequence(&mut session);

    let names: Vec<&str> = session
        .drain_events()
        .iter()
        .map(|e| match e {
            SessionEvent::Started => "started",
            SessionEvent::RoundStarted { .. } => "round_started",
            SessionEvent::TokenShown { .. } => "shown",
            SessionEvent::TokenHidden { .. } => "hidden",
            SessionEvent::AwaitingInput { .. } => "awaiting",
            SessionEvent::InputAccepted { .. } => "accepted",
            SessionEvent::InputWrong { .. } => "wrong",
            SessionEvent::RoundCompleted { .. } => "completed",
            SessionEvent::RoundFailed { .. } => "failed",
            SessionEvent::GameOver { .. } => "game_over",
            SessionEvent::Finished { .. } => "finished",
            SessionEvent::Exited { .. } => "exited",
        })
        .collect();
    assert_eq!(
        names,
        vec![
            "started",
            "round_started",
            "shown",
            "hidden",
            "shown",
            "hidden",
            "shown",
            "hidden",
            "awaiting",
            "accepted",
            "accepted",
            "accepted",
            "completed",
        ]
    );
}

#[test]
fn test_events_serialize_with_tag() {
    let event = SessionEvent::GameOver {
        score: 20,
        round: 1,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["event"], "game_over");
    assert_eq!(json["score"], 20);
}

#[test]
fn test_null_tracker_session() {
    let mut session = Session::new(
        abc_config(),
        RandomSequences::seeded(5),
        NullTracker,
    )
    .unwrap();
    session.start().unwrap();
    session.advance(ms(60_000));
    assert_eq!(session.state(), GameState::AwaitingInput);
    session.exit();
    assert_eq!(session.state(), GameState::Menu);
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let mut config = EngineConfig::default();
    config.game.alphabet_size = 0;
    let result = Session::new(config, RandomSequences::seeded(1), NullTracker);
    assert!(result.is_err());
}
