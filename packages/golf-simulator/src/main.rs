//! Golf simulator CLI - plays headless games between two AI peers.
//!
//! Games run through the real synchronization path (rooms, snapshot store,
//! peer clients), so the run doubles as a soak test of the engine.

mod output;
mod simulator;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use golf::ai::{create_ai, AiPlayer};
use golf::domain::{DiscardRule, JokerRules, Ruleset};
use golf::{ruleset_from_env, WritePolicy};
use output::OutputWriter;
use simulator::{GameReport, Simulator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "golf-simulator")]
#[command(about = "Headless two-player golf games between AI peers")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// AI type for both seats
    #[arg(long, default_value = "random")]
    ai: String,

    /// Joker variant (defaults to GOLF_JOKERS)
    #[arg(long)]
    jokers: Option<JokerArg>,

    /// What a discard does to the turn (defaults to GOLF_DISCARD_RULE)
    #[arg(long)]
    discard_rule: Option<DiscardArg>,

    /// Accept stale writes instead of rejecting them
    #[arg(long)]
    last_write_wins: bool,

    /// Write one JSON line per game here
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum JokerArg {
    None,
    Suitless,
    TwoSuits,
    AllSuits,
}

impl From<JokerArg> for JokerRules {
    fn from(arg: JokerArg) -> Self {
        match arg {
            JokerArg::None => JokerRules::None,
            JokerArg::Suitless => JokerRules::Suitless,
            JokerArg::TwoSuits => JokerRules::TwoSuits,
            JokerArg::AllSuits => JokerRules::AllSuits,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DiscardArg {
    RequireFlip,
    EndsTurn,
}

impl From<DiscardArg> for DiscardRule {
    fn from(arg: DiscardArg) -> Self {
        match arg {
            DiscardArg::RequireFlip => DiscardRule::RequireFlip,
            DiscardArg::EndsTurn => DiscardRule::EndsTurn,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG still takes precedence over the verbosity flag.
    golf::telemetry::init_tracing_with_default(if args.verbose { "debug" } else { "warn" });

    let mut rules: Ruleset = ruleset_from_env()?;
    if let Some(jokers) = args.jokers {
        rules.jokers = jokers.into();
    }
    if let Some(discard) = args.discard_rule {
        rules.discard = discard.into();
    }
    let policy = if args.last_write_wins {
        WritePolicy::LastWriteWins
    } else {
        WritePolicy::VersionChecked
    };
    info!(games = args.games, ?rules, ?policy, "Starting simulation");

    let mut writer = args.output.as_deref().map(OutputWriter::create).transpose()?;
    let simulator = Simulator::new(rules, policy);

    let start = Instant::now();
    let mut reports = Vec::new();
    let mut errors = 0u32;

    for game_num in 1..=args.games {
        let seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };
        let ais = [
            make_ai(&args.ai, seed)?,
            make_ai(&args.ai, seed.wrapping_add(1))?,
        ];
        match simulator.play(game_num, seed, &ais).await {
            Ok(report) => {
                if let Some(w) = writer.as_mut() {
                    if let Err(e) = w.write_game(&report) {
                        warn!("Failed to write report for game {}: {}", game_num, e);
                    }
                }
                info!(game_num, scores = ?report.scores, winner = report.winner, "Game completed");
                reports.push(report);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    if let Some(w) = writer {
        println!("Results written to: {}", w.path().display());
        w.finish()?;
    }
    print_summary(&reports, errors, start.elapsed(), args.games);
    Ok(())
}

fn make_ai(ai_type: &str, seed: u64) -> Result<Box<dyn AiPlayer>, Box<dyn std::error::Error>> {
    create_ai(ai_type, Some(seed)).ok_or_else(|| format!("Unknown AI type: {ai_type}").into())
}

fn print_summary(reports: &[GameReport], errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", reports.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if reports.is_empty() {
        return;
    }

    let n = reports.len() as f64;
    let mut wins = [0u32; 2];
    let mut total_scores = [0i64; 2];
    let mut actions = 0usize;
    let mut reshuffles = 0usize;
    for report in reports {
        wins[usize::from(report.winner)] += 1;
        for (seat, &score) in report.scores.iter().enumerate() {
            total_scores[seat] += i64::from(score);
        }
        actions += report.actions;
        reshuffles += report.reshuffles;
    }

    println!("Average actions per game: {:.1}", actions as f64 / n);
    println!("Reshuffles: {reshuffles}");
    println!("\n=== Results by Seat ===");
    for seat in 0..2 {
        println!(
            "Seat {}: avg={:.1}, wins={} ({:.1}%)",
            seat,
            total_scores[seat] as f64 / n,
            wins[seat],
            f64::from(wins[seat]) / n * 100.0
        );
    }
}
