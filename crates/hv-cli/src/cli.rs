//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hv_core::ViewMode;

/// Run Harvest from the CLI.
///
/// Reads credentials from `HARVEST_API_TOKEN` and `HARVEST_ACCOUNT_ID`, or
/// from the config file. Create a personal access token at
/// <https://id.getharvest.com/developers>.
#[derive(Debug, Parser)]
#[command(name = "hcli", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(
        short,
        long,
        global = true,
        visible_alias = "debug",
        visible_short_alias = 'D'
    )]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the time entries for a date (defaults to today).
    Status {
        /// Date to show, in format YYYY-MM-DD.
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Show the week from Monday through the date.
        #[arg(short, long, conflicts_with = "total")]
        week: bool,

        /// Show per-task totals for the week.
        #[arg(short, long)]
        total: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start a new timer on a chosen project and task.
    Start {
        /// Stop any running timer first instead of refusing to start.
        #[arg(long)]
        switch: bool,
    },

    /// Stop the running timer.
    Stop,
}

/// Maps the `status` flags to a view.
pub const fn view_mode(week: bool, total: bool) -> ViewMode {
    if week {
        ViewMode::Weekly
    } else if total {
        ViewMode::WeeklyTotals
    } else {
        ViewMode::Daily
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}
