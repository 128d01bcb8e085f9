//! `reunion` CLI — run the meeting scheduling engine over a JSON snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Schedule meetings for the year starting today (snapshot on stdin)
//! reunion schedule < snapshot.json
//!
//! # Schedule from a file, fixed window and seed, result to a file
//! reunion schedule -i snapshot.json -o schedule.json \
//!     --start 2026-01-01 --days 365 --seed 7
//!
//! # Inspect one participant's resolved availability
//! reunion availability -i snapshot.json --name Alice --start 2026-01-01
//! ```
//!
//! The snapshot is `{"preferences": [...], "histories": [...],
//! "holidays": [...]}`; the holiday entries feed the engine's calendar
//! lookup. Loading, window construction, and output are the only concerns
//! here — the engine itself does no I/O.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::{self, Read};

use reunion_engine::{resolve_available_dates, DateWindow, HolidayCalendar, HolidayEntry, Snapshot};

#[derive(Parser)]
#[command(
    name = "reunion",
    version,
    about = "Meeting date and participant selection for recurring group reunions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a schedule from a snapshot of preferences and histories
    Schedule {
        /// Input snapshot JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// First day of the scheduling window (YYYY-MM-DD; today if omitted)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Window length in days
        #[arg(long, default_value_t = 365)]
        days: i64,
        /// Seed for the documented random tie-breaks
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// List one participant's resolved available dates in the window
    Availability {
        /// Input snapshot JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Participant display name
        #[arg(long)]
        name: String,
        /// First day of the window (YYYY-MM-DD; today if omitted)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Window length in days
        #[arg(long, default_value_t = 365)]
        days: i64,
    },
}

/// On-disk snapshot format: the engine snapshot plus the holiday feed.
#[derive(Deserialize)]
struct SnapshotFile {
    #[serde(flatten)]
    snapshot: Snapshot,
    #[serde(default)]
    holidays: Vec<HolidayEntry>,
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Schedule {
            input,
            output,
            start,
            days,
            seed,
        } => {
            let file = load_snapshot(input.as_deref())?;
            let window = make_window(start, days)?;
            let calendar = HolidayCalendar::from_entries(file.holidays);
            let result = reunion_engine::schedule(&file.snapshot, &calendar, window, seed);
            let json = serde_json::to_string_pretty(&result)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Availability {
            input,
            name,
            start,
            days,
        } => {
            let file = load_snapshot(input.as_deref())?;
            let window = make_window(start, days)?;
            let calendar = HolidayCalendar::from_entries(file.holidays);
            let preference = file
                .snapshot
                .preferences
                .iter()
                .find(|p| p.name == name)
                .with_context(|| format!("No participant named '{}' in the snapshot", name))?;
            for date in resolve_available_dates(preference, &calendar, window) {
                println!("{}", date);
            }
        }
    }

    Ok(())
}

fn load_snapshot(path: Option<&str>) -> Result<SnapshotFile> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse snapshot JSON")
}

fn make_window(start: Option<NaiveDate>, days: i64) -> Result<DateWindow> {
    let start = start.unwrap_or_else(|| Utc::now().date_naive());
    let end = start + Duration::days(days);
    DateWindow::new(start, end).context("Invalid scheduling window")
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
