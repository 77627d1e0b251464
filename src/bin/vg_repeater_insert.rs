use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use vg_repeater_insert::io::{load_net_file, load_technology_file, write_output_file};
use vg_repeater_insert::{build_tree, solve};

/// Inserts repeaters (buffers) along a routed signal net to maximize the
/// required-arrival-time seen at the driver.
#[derive(Parser, Debug)]
#[command(
    about = "Inserts repeaters along a routed net to maximize driver RAT",
    long_about = None
)]
struct Args {
    /// Technology file: wire RC parameters and the buffer cell to insert.
    tech_path: PathBuf,

    /// Net file: the routing tree, sink loads, and required-arrival-times.
    net_path: PathBuf,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (errors only).
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let (wire, buffer) = load_technology_file(&args.tech_path)
        .with_context(|| format!("while reading {}", args.tech_path.display()))?;

    let loaded_net = load_net_file(&args.net_path)
        .with_context(|| format!("while reading {}", args.net_path.display()))?;

    let tree = build_tree(&loaded_net.edges, &loaded_net.sinks)
        .with_context(|| format!("while building the routing tree from {}", args.net_path.display()))?;

    let solution = solve(&tree, wire, buffer)
        .with_context(|| "while solving for buffer placement")?;

    log::info!(
        "driver rat = {}, driver c = {}, {} buffer(s) placed",
        solution.rat,
        solution.c,
        solution
            .placements
            .iter()
            .filter(|p| !(p.parent_id == 0 && p.child_id == 0))
            .count()
    );

    write_output_file(&args.net_path, &loaded_net, &solution)
        .with_context(|| format!("while writing output next to {}", args.net_path.display()))?;

    Ok(())
}
