use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use itr_cli::commands::{config, replay};
use itr_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so replay output stays valid JSONL
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut tracker_config = itr_cli::config::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;
    if cli.enabled {
        tracker_config.enabled = true;
    }
    tracing::debug!(?tracker_config, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Commands::Replay { script }) => {
            let stats = match script {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    replay::run(BufReader::new(file), &mut stdout, tracker_config)?
                }
                None => replay::run(io::stdin().lock(), &mut stdout, tracker_config)?,
            };
            tracing::info!(
                operations = stats.operations,
                events = stats.events,
                "replayed script"
            );
        }
        Some(Commands::Config) => {
            config::run(&mut stdout, &tracker_config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
