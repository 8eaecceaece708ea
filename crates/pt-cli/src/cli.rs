//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::util::DateRangeArgs;

/// Sync calendar events into ProTimes.
///
/// Calendar events whose title matches a project pattern (by default
/// `[project-name]`) are booked as time entries. Entries written by this
/// tool are tagged so later syncs can replace them.
#[derive(Debug, Parser)]
#[command(name = "pt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
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
    /// List projects available in ProTimes.
    Projects,

    /// List time entries in a date range.
    TimeEntries {
        #[command(flatten)]
        range: DateRangeArgs,
    },

    /// Refresh the local project catalog from ProTimes.
    SyncConfig,

    /// Replace synced time entries with the calendar's events.
    SyncEntries {
        #[command(flatten)]
        range: DateRangeArgs,
    },

    /// Show the local project catalog in match order.
    Catalog,
}
