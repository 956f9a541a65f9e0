//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Interaction timing recorder.
///
/// Replays scripted UI actions through an interaction tracker and prints the
/// events it would hand to a log sink.
#[derive(Debug, Parser)]
#[command(name = "itr", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable the tracker regardless of configuration.
    #[arg(long, global = true)]
    pub enabled: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSONL script of tracker operations, printing emitted events.
    Replay {
        /// Script file to read (defaults to stdin).
        script: Option<PathBuf>,
    },

    /// Print the resolved tracker configuration as JSON.
    Config,
}
