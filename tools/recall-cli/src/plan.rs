//! Plan command - print the difficulty table
//!
//! Shows what the planner produces for the first rounds of the configured
//! variant, so a difficulty curve can be checked without playing it.

use anyhow::{Result, ensure};
use clap::Args;
use recall_core::{DifficultyPlanner, EngineConfig, RoundPlan};
use serde::Serialize;

/// Arguments for the plan command
#[derive(Args)]
pub struct PlanArgs {
    /// Number of rounds to show
    #[arg(short, long, default_value_t = 15)]
    pub rounds: u32,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PlanRow {
    round: u32,
    #[serde(flatten)]
    plan: RoundPlan,
    presentation_ms: u64,
}

/// Execute the plan command
pub fn execute(args: PlanArgs, config: EngineConfig) -> Result<()> {
    ensure!(args.rounds > 0, "--rounds must be at least 1");
    let rows = plan_rows(&DifficultyPlanner::new(config.planner), args.rounds);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:>5}  {:>6}  {:>8}  {:>8}  {:>9}",
        "round", "length", "show", "gap", "total"
    );
    for row in &rows {
        println!(
            "{:>5}  {:>6}  {:>6}ms  {:>6}ms  {:>8.2}s",
            row.round,
            row.plan.sequence_length,
            row.plan.presentation_speed_ms,
            row.plan.inter_item_delay_ms,
            row.presentation_ms as f64 / 1000.0
        );
    }
    Ok(())
}

fn plan_rows(planner: &DifficultyPlanner, rounds: u32) -> Vec<PlanRow> {
    (1..=rounds)
        .map(|round| {
            let plan = planner.plan(round);
            PlanRow {
                round,
                plan,
                presentation_ms: plan.presentation_time().as_millis() as u64,
            }
        })
        .collect()
}
