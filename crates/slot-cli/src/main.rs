//! `slotfinder` CLI — find meeting slots for a team from a JSON calendar snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Full search: perfect slots, best slot, and the score table as JSON
//! slotfinder suggest -d team.json --team 1 \
//!     --start 2026-03-16T09:00 --end 2026-03-16T12:00 --duration 60
//!
//! # Snapshot from stdin, pretty-printed, ignoring day-blocking tasks
//! cat team.json | slotfinder suggest --team 1 --start ... --end ... --duration 30 --pretty --no-tasks
//!
//! # Just the candidate grid for a window
//! slotfinder slots --start 2026-03-16T09:10 --end 2026-03-16T11:00 --duration 30
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to trace the pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use slot_engine::{
    find_meeting_slots, generate_slots, InMemorySource, SlotRequest, SlotSuggestion, Snapshot,
};

#[derive(Parser)]
#[command(
    name = "slotfinder",
    version,
    about = "Find meeting slots where a whole team is free"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every candidate slot for a team and pick the best
    Suggest {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        data: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Team id
        #[arg(long, allow_hyphen_values = true)]
        team: i64,
        /// Window start, e.g. 2026-03-16T09:00
        #[arg(long)]
        start: String,
        /// Window end, e.g. 2026-03-16T12:00
        #[arg(long)]
        end: String,
        /// Meeting length in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: i64,
        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,
        /// Do not let dated tasks block their day
        #[arg(long)]
        no_tasks: bool,
    },
    /// Print the candidate slot grid for a window, one slot per line
    Slots {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, allow_hyphen_values = true)]
        duration: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest {
            data,
            output,
            team,
            start,
            end,
            duration,
            pretty,
            no_tasks,
        } => {
            let json = read_input(data.as_deref())?;
            let snapshot = Snapshot::from_json(&json).context("Failed to parse snapshot JSON")?;

            let mut policy = snapshot.policy.unwrap_or_default();
            if no_tasks {
                policy.tasks_block_day = false;
            }
            policy.validate().context("Invalid snapshot policy")?;

            let request = SlotRequest::with_policy(team, &start, &end, duration, &policy)
                .context("Invalid slot request")?;
            debug!(team, %start, %end, duration, ?policy, "slot search requested");
            let source = InMemorySource::new(snapshot);

            let suggestion = find_meeting_slots(&source, &request, &policy)
                .await
                .with_context(|| format!("Failed to find meeting slots for team {}", team))?;

            if suggestion.no_slots_possible() {
                eprintln!(
                    "No possible slots in this range for a {}-minute meeting",
                    duration
                );
            }

            write_output(output.as_deref(), &render(&suggestion, pretty)?)?;
        }
        Commands::Slots {
            start,
            end,
            duration,
        } => {
            let slots = generate_slots(&start, &end, duration);
            if slots.is_empty() {
                eprintln!(
                    "No possible slots in this range for a {}-minute meeting",
                    duration
                );
            }
            for slot in slots {
                println!("{}", slot);
            }
        }
    }

    Ok(())
}

fn render(suggestion: &SlotSuggestion, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(suggestion)?
    } else {
        serde_json::to_string(suggestion)?
    };
    Ok(rendered)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
