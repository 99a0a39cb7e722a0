//! Command-line interface for strictly_sos.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strictly_sos::Variant;

/// Strictly SOS - play SOS against people, the heuristic or an LLM
#[derive(Parser, Debug)]
#[command(name = "strictly_sos")]
#[command(about = "SOS board game with heuristic and LLM opponents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in the terminal
    Play {
        /// Board side length (3-12), overrides the config file
        #[arg(short, long)]
        size: Option<usize>,

        /// Rule variant: simple or general, overrides the config file
        #[arg(short, long)]
        variant: Option<Variant>,

        /// Who plays the first seat
        #[arg(long, value_enum, default_value_t = SeatKind::Human)]
        player_one: SeatKind,

        /// Who plays the second seat
        #[arg(long, value_enum, default_value_t = SeatKind::Heuristic)]
        player_two: SeatKind,

        /// Path to a TOML match configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for reproducible heuristic tie-breaks
        #[arg(long)]
        seed: Option<u64>,

        /// Disable the heuristic's one-exchange lookahead
        #[arg(long)]
        no_lookahead: bool,
    },
}

/// Kind of player occupying a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeatKind {
    /// Moves typed on stdin
    Human,
    /// Local win / block / random search
    Heuristic,
    /// Remote oracle from the config file
    Remote,
}
