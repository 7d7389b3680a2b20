use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "race result reconciliation backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Merge two scraped result sets for the same event into one
    Reconcile {
        /// JSON file with the primary source's results
        primary: PathBuf,
        /// JSON file with the secondary source's results
        secondary: PathBuf,
        /// Auto-merge confidence threshold (defaults to 85)
        #[arg(short, long)]
        threshold: Option<u8>,
        /// Write the full reconciliation result as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a scraped result set for plausibility and completeness
    Validate {
        /// JSON file with the scraped results
        results: PathBuf,
        /// Canonical distance name, e.g. "10K" or "Half Marathon"
        #[arg(short, long)]
        distance: String,
        /// Write the full validation result as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Resolve unlinked results against a roster of known athletes
    Match {
        /// JSON file with the unlinked results
        results: PathBuf,
        /// JSON file with the athlete roster
        roster: PathBuf,
        /// Event the results belong to, for position-proximity scoring
        #[arg(short, long)]
        event: Option<String>,
        /// Confidence threshold for automatic linking (defaults to 90)
        #[arg(short, long)]
        threshold: Option<u8>,
        /// Link automatically instead of printing suggestions
        #[arg(long)]
        auto: bool,
    },
}
