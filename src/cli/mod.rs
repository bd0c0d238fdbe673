// src/cli/mod.rs
use clap::Parser;
use std::path::PathBuf;

pub mod commands;
pub mod handlers;
pub mod menu;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Personalized wordlist generator", long_about = None)]
pub struct Args {
    /// Print machine-readable JSON instead of formatted text
    #[arg(long)]
    pub json: bool,

    /// Directory wordlists are written to and read from
    #[arg(long, short, env = "WORDFORGE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Command to execute (interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}
