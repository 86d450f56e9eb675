//! Hex-Rust: a Hex engine with Monte Carlo move selection.
//!
//! ## Usage
//!
//! - `hex-rust` - Run a short engine-vs-engine demo
//! - `hex-rust htp` - Start the HTP server for GUI integration
//! - `hex-rust demo` - Run the engine-vs-engine demo

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hex_rust::constants::{DEFAULT_SIZE, N_PLAYOUTS, N_THREADS};
use hex_rust::game::{Controller, Game};
use hex_rust::htp::HtpEngine;
use hex_rust::playout::SearchConfig;

/// Hex-Rust: a Hex engine with Monte Carlo move selection
#[derive(Parser)]
#[command(name = "hex-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTP (Hex Text Protocol) server for use with GUI applications
    Htp(EngineArgs),
    /// Let the engine play both sides and print the final board
    Demo(EngineArgs),
}

#[derive(Args, Clone, Copy)]
struct EngineArgs {
    /// Board size (NxN)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Playouts per automated move
    #[arg(long, default_value_t = N_PLAYOUTS)]
    playouts: usize,
    /// Worker threads used for playouts
    #[arg(long, default_value_t = N_THREADS)]
    threads: usize,
    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for EngineArgs {
    fn default() -> Self {
        Self {
            size: 7,
            playouts: 200,
            threads: N_THREADS,
            seed: None,
        }
    }
}

impl EngineArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            playouts: self.playouts,
            threads: self.threads,
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Htp(args)) => {
            let mut engine = HtpEngine::new(args.size, args.config())?;
            engine.run().context("HTP session failed")?;
        }
        Some(Commands::Demo(args)) => run_demo(args)?,
        None => run_demo(EngineArgs::default())?,
    }
    Ok(())
}

fn run_demo(args: EngineArgs) -> anyhow::Result<()> {
    println!("Hex-Rust: Monte Carlo Hex engine\n");

    let config = args.config();
    let mut game = Game::new(
        args.size,
        Controller::Automated(config),
        Controller::Automated(config),
    )?;

    println!(
        "Playing {0}x{0} with {1} playouts per move...",
        args.size, config.playouts
    );
    let moves = game
        .play_automated_moves()
        .context("automated match failed")?;

    let line: Vec<String> = moves.iter().map(|cell| cell.to_string()).collect();
    println!("Moves: {}", line.join(" "));
    println!("{}", game.board());
    match game.winner() {
        Some(winner) => println!("Winner: {winner} after {} moves", game.movement_count()),
        None => println!("No winner"),
    }
    Ok(())
}
