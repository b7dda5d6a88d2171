//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Fetches JMA forecasts into SQLite and browses them
pub struct Cli {
    /// SQLite database file [default: ~/jma-forecast.sqlite]
    #[arg(long, env = "JMA_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Root of the JMA JSON endpoints
    #[arg(long, env = "JMA_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "JMA_TIMEOUT", default_value_t = 10, global = true)]
    pub timeout: u64,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh the area hierarchy
    Areas {},
    /// Refresh the forecast tables
    Forecasts {
        /// Office code to fetch; repeat for several, default is every stored office
        #[arg(long = "office")]
        offices: Vec<String>,
    },
    /// Refresh areas, then forecasts of every office
    Sync {},
    /// Print the short-term forecast of an office
    Show {
        office: String,
        /// Only areas whose name contains this text
        #[arg(long)]
        area: Option<String>,
    },
    /// Print the weekly temperature outlook of a station
    Weekly { office: String, code: String },
    /// Open the forecast viewer
    View {
        /// Font file with Japanese glyphs
        #[arg(long, env = "JMA_FONT")]
        font: Option<PathBuf>,
    },
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}

// -- Tests -------------------------------------------------------------------
