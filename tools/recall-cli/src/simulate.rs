//! Simulate command - headless autoplayed sessions
//!
//! Drives the engine with fixed ticks and an autoplayer that repeats each
//! token correctly with a given probability. Useful for checking how a
//! difficulty curve and scoring variant play out before shipping it.

use anyhow::{Result, ensure};
use clap::Args;
use rand::Rng;
use rand_pcg::Pcg32;
use recall_core::{
    EngineConfig, GameState, RandomSequences, RuntimeConfig, SequenceSource, Session,
    SessionEvent, SessionTracker, Token,
};

use crate::report::{Ending, ReportTracker, SessionReport};

/// Stream selector separating the autoplayer's draws from sequence generation
const PLAYER_STREAM: u64 = 0x5eed_0f_91a7;

/// Arguments for the simulate command
#[derive(Args)]
pub struct SimulateArgs {
    /// Seed for the first session (later sessions use seed + n)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probability that the autoplayer repeats a token correctly (0.0-1.0)
    #[arg(long, default_value_t = 0.95)]
    pub accuracy: f64,

    /// Number of sessions to run
    #[arg(long, default_value_t = 1)]
    pub sessions: u32,

    /// Abandon a session after this many rounds
    #[arg(long, default_value_t = 500)]
    pub round_limit: u32,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Execute the simulate command
pub fn execute(args: SimulateArgs, config: EngineConfig) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&args.accuracy),
        "accuracy must be between 0.0 and 1.0"
    );
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let mut reports = Vec::with_capacity(args.sessions as usize);
    for n in 0..args.sessions {
        let seed = base_seed.wrapping_add(n as u64);
        let report = run_session(&config, seed, args.accuracy, args.round_limit)?;
        tracing::info!(
            seed,
            score = report.score,
            round = report.round,
            "simulated session"
        );
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_table(&reports);
    }
    Ok(())
}

/// Play one session to its end with the autoplayer
pub fn run_session(
    config: &EngineConfig,
    seed: u64,
    accuracy: f64,
    round_limit: u32,
) -> Result<SessionReport> {
    let mut session = Session::new(
        config.clone(),
        RandomSequences::seeded(seed),
        ReportTracker::new(seed),
    )?;
    let mut player = Pcg32::new(seed, PLAYER_STREAM);
    let tick = RuntimeConfig::default().tick_duration();
    let mut ending = None;

    session.start()?;
    while ending.is_none() {
        match session.state() {
            GameState::Presenting | GameState::RoundComplete => session.advance(tick),
            GameState::AwaitingInput => {
                let token = choose_token(&session, &mut player, accuracy);
                session.submit(token)?;
            }
            GameState::Menu | GameState::GameOver => {}
        }

        if session.round_number() > round_limit && session.state().is_running() {
            tracing::warn!(round_limit, "round limit reached, abandoning session");
            session.exit();
        }
        ending = session.drain_events().iter().find_map(|event| match event {
            SessionEvent::GameOver { .. } => Some(Ending::GameOver),
            SessionEvent::Finished { .. } => Some(Ending::Finished),
            SessionEvent::Exited { .. } => Some(Ending::Exited),
            _ => None,
        });
    }

    if !session.tracker().has_ended() {
        tracing::warn!(seed, "session ended without a final report");
    }
    let game_time_ms = session.now().as_millis() as u64;
    let mut report = session.tracker().report.clone();
    report.ending = ending;
    report.game_time_ms = game_time_ms;
    Ok(report)
}

/// Expected token with probability `accuracy`, otherwise a different one
fn choose_token<S: SequenceSource, T: SessionTracker>(
    session: &Session<S, T>,
    player: &mut Pcg32,
    accuracy: f64,
) -> Token {
    let Some(expected) = session.current_round().and_then(|r| r.expected()) else {
        return Token(0);
    };
    if player.random_bool(accuracy) {
        return expected;
    }
    let size = session.alphabet().size();
    // Shift by 1..size so the pick never lands on the expected token
    let offset = player.random_range(1..size);
    Token((expected.index() + offset) % size)
}

fn print_table(reports: &[SessionReport]) {
    println!(
        "{:>20}  {:>7}  {:>5}  {:>8}  {:>9}  {:<9}",
        "seed", "score", "round", "accuracy", "time", "ending"
    );
    for r in reports {
        let ending = match r.ending {
            Some(Ending::GameOver) => "game over",
            Some(Ending::Finished) => "finished",
            Some(Ending::Exited) => "abandoned",
            None => "-",
        };
        println!(
            "{:>20}  {:>7}  {:>5}  {:>7.1}%  {:>8.1}s  {:<9}",
            r.seed,
            r.score,
            r.round,
            r.accuracy() * 100.0,
            r.game_time_ms as f64 / 1000.0,
            ending
        );
    }
    if reports.len() > 1 {
        let mean = reports.iter().map(|r| r.score as f64).sum::<f64>() / reports.len() as f64;
        let best = reports.iter().map(|r| r.round).max().unwrap_or(0);
        println!();
        println!("mean score {mean:.1}, best round {best}");
    }
}
