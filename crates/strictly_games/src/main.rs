//! Strictly SOS - terminal front end
//!
//! Plays one match on stdin/stdout. Human moves are typed as
//! `row col letter` (e.g. `1 2 S`) or as a token (`R1C2LS`).

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, SeatKind};
use std::io::BufRead;
use strictly_games::{
    GameEvent, HeuristicPlayer, HeuristicSettings, HttpOracle, InteractivePlayer, LlmClient,
    MoveOracle, MoveSource, Orchestrator, RemoteBackend, RemotePlayer, RemoteSettings,
    RetryPolicy, SosConfig,
};
use strictly_sos::{GameState, HeuristicSearch, Move, Outcome, Seat};
use tokio::sync::{mpsc, watch};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            size,
            variant,
            player_one,
            player_two,
            config,
            seed,
            no_lookahead,
        } => {
            let mut settings = match config {
                Some(path) => SosConfig::from_file(&path)?,
                None => SosConfig::default(),
            };
            if let Some(size) = size {
                settings.set_board_size(size);
            }
            if let Some(variant) = variant {
                settings.set_variant(variant);
            }
            if seed.is_some() {
                settings.heuristic_mut().set_seed(seed);
            }
            if no_lookahead {
                settings.heuristic_mut().set_lookahead(false);
            }
            settings.validate()?;
            run_play(settings, player_one, player_two).await
        }
    }
}

/// Runs one match until it ends, fails or is interrupted with Ctrl-C.
#[instrument(skip(config), fields(size = *config.board_size(), variant = %config.variant()))]
async fn run_play(config: SosConfig, player_one: SeatKind, player_two: SeatKind) -> Result<()> {
    let game = GameState::new(*config.board_size(), *config.variant())?;

    let mut inputs = Vec::new();
    let first = build_source(Seat::One, player_one, &config, &mut inputs)?;
    let second = build_source(Seat::Two, player_two, &config, &mut inputs)?;
    let humans: Vec<Seat> = inputs.iter().map(|(seat, _)| *seat).collect();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let (turn_tx, turn_rx) = watch::channel(Seat::One);

    if !inputs.is_empty() {
        // Blocking reads get their own thread so shutdown never waits on stdin.
        std::thread::spawn(move || read_moves(inputs, turn_rx));
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received");
            let _ = cancel_tx.send(true);
        }
    });

    let printer = tokio::spawn(print_events(event_rx, turn_tx, humans));

    let mut orchestrator = Orchestrator::new(game, first, second, event_tx, cancel_rx)
        .with_retry(retry_policy(&config));
    let result = orchestrator.run().await;
    drop(orchestrator);
    printer.await?;

    result.map(|_| ())
}

fn build_source(
    seat: Seat,
    kind: SeatKind,
    config: &SosConfig,
    inputs: &mut Vec<(Seat, mpsc::UnboundedSender<Move>)>,
) -> Result<MoveSource> {
    let source = match kind {
        SeatKind::Human => {
            let (player, tx) = InteractivePlayer::channel(format!("{} (human)", seat));
            inputs.push((seat, tx));
            player.into()
        }
        SeatKind::Heuristic => {
            let settings = config.heuristic();
            HeuristicPlayer::new(
                format!("{} (heuristic)", seat),
                heuristic_search(settings, u64::from(seat.number())),
                settings.simple_delay(),
                settings.general_delay(),
            )
            .into()
        }
        SeatKind::Remote => {
            let oracle = build_oracle(config.remote())
                .with_context(|| format!("Failed to set up remote player for {}", seat))?;
            RemotePlayer::new(format!("{} (remote)", seat), oracle).into()
        }
    };
    Ok(source)
}

fn heuristic_search(settings: &HeuristicSettings, salt: u64) -> HeuristicSearch {
    match settings.seed() {
        Some(seed) => HeuristicSearch::seeded(*settings.lookahead(), seed.wrapping_add(salt)),
        None => HeuristicSearch::new(*settings.lookahead()),
    }
}

fn build_oracle(remote: &RemoteSettings) -> Result<Box<dyn MoveOracle>> {
    match remote.backend() {
        RemoteBackend::Llm => Ok(Box::new(LlmClient::new(remote.create_llm_config()?))),
        RemoteBackend::Http => {
            let endpoint = remote
                .endpoint()
                .as_deref()
                .context("remote.endpoint is required for the http backend")?;
            Ok(Box::new(HttpOracle::new(endpoint, remote.timeout())?))
        }
    }
}

fn retry_policy(config: &SosConfig) -> RetryPolicy {
    let attempts = *config.remote().max_attempts();
    if *config.remote().fallback_to_heuristic() {
        RetryPolicy::fallback_after(attempts, heuristic_search(config.heuristic(), 0))
    } else {
        RetryPolicy::abort_after(attempts)
    }
}

/// Reads stdin lines and hands each parsed move to the seat holding the turn.
fn read_moves(inputs: Vec<(Seat, mpsc::UnboundedSender<Move>)>, turn_rx: watch::Receiver<Seat>) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        let mv: Move = match line.parse() {
            Ok(mv) => mv,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        let seat = *turn_rx.borrow();
        match inputs.iter().find(|(s, _)| *s == seat) {
            Some((_, tx)) => {
                if tx.send(mv).is_err() {
                    break;
                }
            }
            None => eprintln!("It is not your turn"),
        }
    }
    warn!("Input closed");
}

async fn print_events(
    mut event_rx: mpsc::UnboundedReceiver<GameEvent>,
    turn_tx: watch::Sender<Seat>,
    humans: Vec<Seat>,
) {
    while let Some(event) = event_rx.recv().await {
        match event {
            GameEvent::StateChanged { board, to_move } => {
                println!("\n{}\n", board);
                if let Some(seat) = to_move {
                    let _ = turn_tx.send(seat);
                    if humans.contains(&seat) {
                        println!("{}, enter a move (row col S|O):", seat);
                    }
                }
            }
            GameEvent::MoveApplied {
                player,
                mv,
                scores,
                ..
            } => println!("{} played {}. Score {} - {}", player, mv, scores.0, scores.1),
            GameEvent::MoveRejected { seat, mv, reason } => {
                println!("{} cannot play {}: {}. Try again:", seat, mv, reason)
            }
            GameEvent::SequenceNotice { seat, count } => {
                println!("{} completed {} SOS!", seat, count)
            }
            GameEvent::SourceFailed {
                seat,
                attempt,
                error,
            } => println!("{} failed to move (attempt {}): {}", seat, attempt, error),
            GameEvent::FallbackUsed { seat } => {
                println!("{} is out of attempts; the heuristic moves instead", seat)
            }
            GameEvent::GameOver { outcome, scores } => match outcome {
                Outcome::Winner(seat) => {
                    println!("Game over: {} wins {} - {}", seat, scores.0, scores.1)
                }
                Outcome::Draw => println!("Game over: draw {} - {}", scores.0, scores.1),
            },
            GameEvent::Cancelled => println!("Game abandoned"),
        }
    }
}
