// src/cli/commands.rs
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a wordlist from a JSON file of facts
    Generate {
        /// JSON object mapping field names to values
        #[arg(long)]
        facts: Option<PathBuf>,

        /// Size menu option (1-8); invalid options fall back to 50,000
        #[arg(long, conflicts_with = "count")]
        size: Option<String>,

        /// Exact number of candidates
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Fill missing fields with the interactive prompt defaults
        #[arg(long)]
        defaults: bool,
    },

    /// List wordlists, newest first
    List,

    /// Show lines of a wordlist
    View {
        /// File name in the output directory, or a path
        #[arg(required = true)]
        file: String,

        /// Number of leading lines to show
        #[arg(long, default_value_t = 10, conflicts_with_all = ["all", "sample"])]
        lines: usize,

        /// Show every line
        #[arg(long)]
        all: bool,

        /// Show a random sample of this many lines
        #[arg(long)]
        sample: Option<usize>,
    },

    /// Delete a wordlist
    Delete {
        /// File name in the output directory, or a path
        #[arg(required = true)]
        file: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}
