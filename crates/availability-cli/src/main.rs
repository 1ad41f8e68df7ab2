//! `avail` CLI — compute group availability from a calendar snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Day-granularity month view with stats (stdin → stdout)
//! cat group.json | avail month --year 2026 --month 3
//!
//! # Interval view over a date range, overriding the group's minimum hours
//! avail range -i group.json --start 2026-03-16 --end 2026-03-20 --min-hours 1
//!
//! # One member's busy/free split per day
//! avail user -i group.json --user alice --start 2026-03-16 --end 2026-03-17
//!
//! # Group rollup with a chosen percentage model
//! avail group -i group.json --start 2026-03-16 --end 2026-03-16 --model common-window
//!
//! # Monday-first month grid
//! avail grid --year 2026 --month 3
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for more detail.

use anyhow::{Context, Result};
use availability_engine::{
    compute_range_availability, detailed_range, group_range_availability, simple_month,
    GroupSettings, GroupSnapshot, MonthGrid, PercentageModel,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "avail",
    version,
    about = "Group availability from calendar snapshots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct Files {
    /// Snapshot JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Day-granularity availability for every day of a month, with stats
    Month {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[command(flatten)]
        files: Files,
    },
    /// Per-member free time and common windows for each date in a range
    Range {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Minimum common window in hours (1-24); defaults to the snapshot setting
        #[arg(long)]
        min_hours: Option<u8>,
        #[command(flatten)]
        files: Files,
    },
    /// One member's busy and free slots for each date in a range
    User {
        #[arg(long)]
        user: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[command(flatten)]
        files: Files,
    },
    /// Group rollup per date with the chosen percentage model
    Group {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long, value_enum, default_value_t = Model::FullyFree)]
        model: Model,
        #[command(flatten)]
        files: Files,
    },
    /// Print a Monday-first calendar grid for a month
    Grid {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Emit the grid as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Model {
    /// Share of members with no events that day
    FullyFree,
    /// Share of the day every member has free
    CommonWindow,
}

impl From<Model> for PercentageModel {
    fn from(model: Model) -> Self {
        match model {
            Model::FullyFree => PercentageModel::FullyFree,
            Model::CommonWindow => PercentageModel::CommonWindow,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Month { year, month, files } => {
            let snapshot = load_snapshot(files.input.as_deref())?;
            let view = simple_month(&snapshot.members, year, month)
                .with_context(|| format!("Failed to compute availability for {year}-{month:02}"))?;
            write_json(files.output.as_deref(), &view)?;
        }
        Commands::Range {
            start,
            end,
            min_hours,
            files,
        } => {
            let snapshot = load_snapshot(files.input.as_deref())?;
            let settings = match min_hours {
                Some(hours) => GroupSettings::new(hours).context("Invalid --min-hours")?,
                None => snapshot.settings,
            };
            let days = detailed_range(&snapshot.members, start, end, &settings)
                .context("Failed to compute detailed availability")?;
            write_json(files.output.as_deref(), &days)?;
        }
        Commands::User {
            user,
            start,
            end,
            files,
        } => {
            let snapshot = load_snapshot(files.input.as_deref())?;
            let member = snapshot
                .members
                .iter()
                .find(|m| m.user_id == user)
                .with_context(|| format!("Unknown member: '{}'", user))?;
            if start > end {
                anyhow::bail!("--start {} is after --end {}", start, end);
            }
            let days = compute_range_availability(&member.events, start, end);
            write_json(files.output.as_deref(), &days)?;
        }
        Commands::Group {
            start,
            end,
            model,
            files,
        } => {
            let snapshot = load_snapshot(files.input.as_deref())?;
            let days = group_range_availability(&snapshot.members, start, end, model.into())
                .context("Failed to compute group availability")?;
            write_json(files.output.as_deref(), &days)?;
        }
        Commands::Grid { year, month, json } => {
            let grid = MonthGrid::new(year, month).context("Invalid month")?;
            if json {
                write_json(None, &grid)?;
            } else {
                print!("{}", render_grid(&grid));
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_snapshot(path: Option<&str>) -> Result<GroupSnapshot> {
    let json = read_input(path)?;
    GroupSnapshot::from_json(&json).context("Failed to load group snapshot")
}

/// Render the grid as text: a `Mo..Su` header and right-aligned day numbers.
fn render_grid(grid: &MonthGrid) -> String {
    let mut out = format!("{:04}-{:02}\nMo Tu We Th Fr Sa Su\n", grid.year, grid.month);
    for week in &grid.weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => format!("{:>2}", day),
                None => "  ".to_string(),
            })
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }
    out
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

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    tracing::debug!(path = path.unwrap_or("stdout"), bytes = content.len(), "writing output");
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
