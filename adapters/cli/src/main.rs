#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays a treasure map configuration.

mod configuration;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use treasure_hunt_rendering::{render_map, render_report};
use treasure_hunt_system_expedition::Expedition;

/// Replays recorded adventurer itineraries over a treasure map.
#[derive(Debug, Parser)]
#[command(name = "treasure-hunt", version)]
struct Cli {
    /// Configuration file describing the map and the adventurers.
    #[arg(short, long)]
    input: PathBuf,
    /// File receiving the end-of-run report. Defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also print a drawing of the final map to standard output.
    #[arg(long)]
    map: bool,
    /// Log every resolved movement unless `RUST_LOG` says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Treasure Hunt command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read configuration {}", cli.input.display()))?;
    let configuration = configuration::parse(&text)
        .with_context(|| format!("invalid configuration {}", cli.input.display()))?;

    let mut expedition = Expedition::new(&configuration.grid, &configuration.adventurers)
        .context("failed to set up the expedition")?;
    let rounds = expedition.run();
    info!(rounds, input = %cli.input.display(), "replay complete");

    let report = render_report(expedition.world());
    match &cli.output {
        Some(path) => fs::write(path, &report)
            .with_context(|| format!("failed to write report {}", path.display()))?,
        None => print!("{report}"),
    }

    if cli.map {
        print!("{}", render_map(expedition.world()));
    }

    Ok(())
}
