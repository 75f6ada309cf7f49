//! Play command - interactive terminal game
//!
//! Tokens are flashed one at a time on a single line and erased again, then
//! the player types the sequence back as letters (`ABCA`). Typing `q` quits.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use recall_core::{
    EngineConfig, GameState, RandomSequences, Runtime, SequenceSource, Session, SessionEvent,
    SessionTracker, SubmitError, Token,
};

use crate::feedback::bell_channel;
use crate::report::ReportTracker;

/// Arguments for the play command
#[derive(Args)]
pub struct PlayArgs {
    /// Seed for the token sequences (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Don't ring the terminal bell on mistakes
    #[arg(long)]
    pub quiet: bool,
}

/// One line typed by the player
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Quit,
    Tokens(Vec<Token>),
    /// Contains something that is not a letter
    Invalid(char),
}

/// Execute the play command
pub fn execute(args: PlayArgs, config: EngineConfig) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, "starting interactive session");

    let mut session = Session::new(
        config,
        RandomSequences::seeded(seed),
        ReportTracker::new(seed),
    )?;
    if !args.quiet {
        session = session.with_feedback(bell_channel());
    }
    let letters: String = session.alphabet().tokens().map(|t| t.label()).collect();
    println!("Repeat the sequence using the letters {letters}. Type q to quit.");

    let mut runtime = Runtime::new(session);
    runtime.session_mut().start()?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    loop {
        runtime.frame();
        for event in runtime.session_mut().drain_events() {
            render(&event, &mut stdout)?;
        }

        match runtime.session().state() {
            GameState::Presenting | GameState::RoundComplete => {
                std::thread::sleep(runtime.tick_duration());
            }
            GameState::AwaitingInput => {
                print!("> ");
                stdout.flush()?;
                line.clear();
                if stdin.lock().read_line(&mut line)? == 0 {
                    runtime.session_mut().exit();
                    break;
                }
                match parse_reply(&line) {
                    Reply::Quit => {
                        runtime.session_mut().exit();
                        break;
                    }
                    Reply::Invalid(c) => println!("'{c}' is not a token"),
                    Reply::Tokens(tokens) => submit_all(&mut runtime, &tokens)?,
                }
                runtime.reset_clock();
            }
            GameState::GameOver => {
                print!("Play again? [y/N] ");
                stdout.flush()?;
                line.clear();
                stdin.lock().read_line(&mut line)?;
                if !line.trim().eq_ignore_ascii_case("y") {
                    break;
                }
                runtime.session_mut().start()?;
                runtime.reset_clock();
            }
            GameState::Menu => break,
        }
    }

    for event in runtime.session_mut().drain_events() {
        render(&event, &mut stdout)?;
    }
    let report = &runtime.session().tracker().report;
    println!(
        "Final score {} at round {} ({:.0}% accurate)",
        report.score,
        report.round,
        report.accuracy() * 100.0
    );
    Ok(())
}

/// Submit typed tokens until the round resolves
fn submit_all<S: SequenceSource, T: SessionTracker>(
    runtime: &mut Runtime<S, T>,
    tokens: &[Token],
) -> Result<()> {
    for &token in tokens {
        match runtime.session_mut().submit(token) {
            Ok(result) if result.round_complete => break,
            Ok(_) => {}
            Err(SubmitError::UnknownToken(token)) => {
                println!("'{token}' is not on this board");
            }
            // The round resolved on a mistake; drop the rest of the line
            Err(SubmitError::NotAcceptingInput(_)) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn parse_reply(line: &str) -> Reply {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Reply::Quit;
    }
    let mut tokens = Vec::with_capacity(line.len());
    for c in line.chars().filter(|c| !c.is_whitespace()) {
        match Token::from_label(c) {
            Some(token) => tokens.push(token),
            None => return Reply::Invalid(c),
        }
    }
    Reply::Tokens(tokens)
}

fn render(event: &SessionEvent, out: &mut impl Write) -> std::io::Result<()> {
    match event {
        SessionEvent::Started => writeln!(out, "New game")?,
        SessionEvent::RoundStarted { round, plan } => writeln!(
            out,
            "\nRound {round}: watch {} tokens",
            plan.sequence_length
        )?,
        SessionEvent::TokenShown { index, token } => write!(out, "\r  {:>2}: {token}", index + 1)?,
        SessionEvent::TokenHidden { .. } => write!(out, "\r        ")?,
        SessionEvent::AwaitingInput { .. } => writeln!(out, "\rYour turn")?,
        SessionEvent::InputAccepted { .. } => {}
        SessionEvent::InputWrong { expected, got } => {
            writeln!(out, "Wrong: expected {expected}, got {got}")?
        }
        SessionEvent::RoundCompleted {
            score,
            bonus,
            streak,
            ..
        } => writeln!(out, "Correct! +{bonus} bonus, score {score}, streak {streak}")?,
        SessionEvent::RoundFailed { lives_left, .. } => {
            writeln!(out, "{lives_left} lives left, watch again")?
        }
        SessionEvent::GameOver { score, round } => {
            writeln!(out, "Game over at round {round} with {score} points")?
        }
        SessionEvent::Finished { score, rounds } => {
            writeln!(out, "All {rounds} rounds cleared with {score} points")?
        }
        SessionEvent::Exited { .. } => writeln!(out)?,
    }
    out.flush()
}
