//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Overtime savings calculator.
///
/// Sums each day's worked time against a daily baseline to show how much
/// overtime has been banked (or owed) over an attendance period.
#[derive(Debug, Parser)]
#[command(name = "ot", version, about, long_about = None)]
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
    /// Print the overtime savings balance.
    Overtime {
        /// Grid snapshot to read (defaults to `grid_path` from config).
        #[arg(long)]
        grid: Option<PathBuf>,

        /// List the days that make up the balance.
        #[arg(long, conflicts_with = "json")]
        detail: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show how each row of the grid is read.
    Records {
        /// Grid snapshot to read (defaults to `grid_path` from config).
        #[arg(long)]
        grid: Option<PathBuf>,
    },

    /// Show the period summary: regular time, day counts and balance.
    Summary {
        /// Grid snapshot to read (defaults to `grid_path` from config).
        #[arg(long)]
        grid: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// View or change settings.
    #[command(subcommand)]
    Config(ConfigAction),
}

/// Settings actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the resolved settings.
    Show,

    /// Print one setting.
    Get {
        /// Setting key (e.g. `baselineDailyWorkTime`).
        key: String,
    },

    /// Change one setting.
    Set {
        /// Setting key (e.g. `baselineDailyWorkTime`).
        key: String,
        /// New value.
        value: String,
    },

    /// Exclude a date from the balance.
    Ignore {
        /// Date label exactly as it appears in the grid.
        date: String,
    },

    /// Count a previously ignored date again.
    Unignore {
        /// Date label exactly as it appears in the grid.
        date: String,
    },
}
