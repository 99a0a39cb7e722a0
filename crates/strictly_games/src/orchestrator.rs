//! Turn loop between two move sources.

use crate::players::{MoveSource, MoveSourceError};
use anyhow::Result;
use strictly_sos::{GameState, HeuristicSearch, Move, Outcome, Seat};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Messages sent from the orchestrator to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Board snapshot after a change.
    StateChanged {
        /// Rendered board.
        board: String,
        /// Seat holding the turn, `None` once the game is over.
        to_move: Option<Seat>,
    },
    /// A move was applied.
    MoveApplied {
        /// Seat that moved.
        seat: Seat,
        /// Name of the seat's player.
        player: String,
        /// The move.
        mv: Move,
        /// Sequences completed by the move.
        sequences: usize,
        /// Scores afterwards, (player 1, player 2).
        scores: (u32, u32),
    },
    /// A move was refused; the board is unchanged and the seat moves again.
    MoveRejected {
        /// Seat that tried to move.
        seat: Seat,
        /// The refused move.
        mv: Move,
        /// Why it was refused.
        reason: String,
    },
    /// A move completed one or more sequences. Sent once per scoring move.
    SequenceNotice {
        /// Seat that scored.
        seat: Seat,
        /// Sequences completed.
        count: usize,
    },
    /// A move source failed; it will be asked again if attempts remain.
    SourceFailed {
        /// Seat whose source failed.
        seat: Seat,
        /// Attempt number, starting at 1.
        attempt: u32,
        /// Failure description.
        error: String,
    },
    /// The heuristic moved in place of a failed source.
    FallbackUsed {
        /// Seat it moved for.
        seat: Seat,
    },
    /// The game ended.
    GameOver {
        /// Winner or draw.
        outcome: Outcome,
        /// Final scores, (player 1, player 2).
        scores: (u32, u32),
    },
    /// The match was abandoned before it ended.
    Cancelled,
}

/// What to do when a remote source keeps failing.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    fallback: Option<HeuristicSearch>,
}

impl RetryPolicy {
    /// Fails the match after `max_attempts` consecutive failures.
    pub fn abort_after(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            fallback: None,
        }
    }

    /// Lets `search` move once `max_attempts` consecutive failures occur.
    pub fn fallback_after(max_attempts: u32, search: HeuristicSearch) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            fallback: Some(search),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::abort_after(3)
    }
}

/// Orchestrates a match between two seats.
///
/// The orchestrator owns the game state; sources only see it by shared
/// reference, so every placement goes through this loop.
pub struct Orchestrator {
    game: GameState,
    player_one: MoveSource,
    player_two: MoveSource,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    cancel_rx: watch::Receiver<bool>,
    retry: RetryPolicy,
}

impl Orchestrator {
    /// Creates an orchestrator for `game`.
    ///
    /// Sending `true` on the `cancel_rx` channel abandons the match; a move
    /// still being computed at that point is discarded.
    pub fn new(
        game: GameState,
        player_one: MoveSource,
        player_two: MoveSource,
        event_tx: mpsc::UnboundedSender<GameEvent>,
        cancel_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            game,
            player_one,
            player_two,
            event_tx,
            cancel_rx,
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Current game state.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Consumes the orchestrator, returning the game state.
    pub fn into_game(self) -> GameState {
        self.game
    }

    /// Runs the game loop until the game ends or is cancelled.
    ///
    /// Returns the outcome, or `None` if cancelled.
    ///
    /// # Errors
    ///
    /// Fails when a source cannot supply a move and no fallback applies,
    /// or when the event receiver has gone away.
    #[instrument(skip(self), fields(size = self.game.board_size(), variant = %self.game.variant()))]
    pub async fn run(&mut self) -> Result<Option<Outcome>> {
        info!(
            player_one = %self.player_one.name(),
            player_two = %self.player_two.name(),
            "Starting game orchestration"
        );
        self.send_state()?;

        loop {
            if let Some(outcome) = self.game.outcome() {
                info!(%outcome, scores = ?self.game.scores(), "Match finished");
                self.event_tx.send(GameEvent::GameOver {
                    outcome,
                    scores: self.game.scores(),
                })?;
                return Ok(Some(outcome));
            }

            let seat = self.game.current_player();
            let Some(mv) = self.next_move(seat).await? else {
                return self.cancelled();
            };

            // A move that arrives after cancellation is stale.
            if *self.cancel_rx.borrow() {
                debug!(mv = %mv, "Discarding move received after cancellation");
                return self.cancelled();
            }

            match self.game.place_move_as(seat, mv) {
                Ok(applied) => {
                    let player = self.source(seat).name().to_string();
                    self.event_tx.send(GameEvent::MoveApplied {
                        seat,
                        player,
                        mv,
                        sequences: applied.sequences.len(),
                        scores: applied.scores,
                    })?;
                    if !applied.sequences.is_empty() && !self.game.sequence_notice_shown() {
                        self.event_tx.send(GameEvent::SequenceNotice {
                            seat,
                            count: applied.sequences.len(),
                        })?;
                        self.game.mark_sequence_notice_shown();
                    }
                    self.send_state()?;
                }
                Err(e) if self.source(seat).is_interactive() => {
                    debug!(error = %e, "Ignoring invalid interactive move");
                    self.event_tx.send(GameEvent::MoveRejected {
                        seat,
                        mv,
                        reason: e.to_string(),
                    })?;
                }
                Err(e) => {
                    anyhow::bail!(
                        "{} produced an illegal move {}: {}",
                        self.source(seat).name(),
                        mv,
                        e
                    )
                }
            }
        }
    }

    /// Asks `seat`'s source for a move, applying the retry policy.
    ///
    /// `None` means the match was cancelled while waiting.
    async fn next_move(&mut self, seat: Seat) -> Result<Option<Move>> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let source = match seat {
                Seat::One => &mut self.player_one,
                Seat::Two => &mut self.player_two,
            };
            debug!(player = %source.name(), attempt, "Waiting for move");

            let result = tokio::select! {
                biased;
                _ = cancellation(&mut self.cancel_rx) => return Ok(None),
                result = source.get_move(&self.game) => result,
            };

            let error = match result {
                Ok(mv) => return Ok(Some(mv)),
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e.into()),
            };

            warn!(seat = %seat, attempt, error = %error, "Move source failed");
            self.event_tx.send(GameEvent::SourceFailed {
                seat,
                attempt,
                error: error.to_string(),
            })?;
            if attempt < self.retry.max_attempts {
                continue;
            }

            return match self.retry.fallback.as_mut() {
                Some(search) => {
                    let mv = search
                        .choose_move(&self.game)
                        .map_err(|_| MoveSourceError::NoLegalMoves)?;
                    info!(seat = %seat, mv = %mv, "Using heuristic fallback");
                    self.event_tx.send(GameEvent::FallbackUsed { seat })?;
                    Ok(Some(mv))
                }
                None => Err(anyhow::Error::new(error)
                    .context(format!("{} gave up after {} attempts", seat, attempt))),
            };
        }
    }

    fn source(&self, seat: Seat) -> &MoveSource {
        match seat {
            Seat::One => &self.player_one,
            Seat::Two => &self.player_two,
        }
    }

    fn send_state(&self) -> Result<()> {
        let to_move = (!self.game.is_over()).then(|| self.game.current_player());
        self.event_tx.send(GameEvent::StateChanged {
            board: self.game.board().display(),
            to_move,
        })?;
        Ok(())
    }

    fn cancelled(&self) -> Result<Option<Outcome>> {
        info!("Match cancelled");
        self.event_tx.send(GameEvent::Cancelled)?;
        Ok(None)
    }
}

/// Resolves once cancellation is requested; never resolves if the sender
/// is dropped without cancelling.
async fn cancellation(cancel_rx: &mut watch::Receiver<bool>) {
    if cancel_rx.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}
