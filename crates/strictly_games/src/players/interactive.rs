//! Player whose moves are injected from outside.

use super::MoveSourceError;
use strictly_sos::{GameState, Move};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Waits on a channel for moves, typically typed by a person.
///
/// There is no deadline: the seat simply holds the turn until a move
/// arrives or the sender side is dropped.
pub struct InteractivePlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<Move>,
}

impl InteractivePlayer {
    /// Creates a player reading from `input_rx`.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<Move>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }

    /// Creates a player together with the sender used to feed it moves.
    pub fn channel(name: impl Into<String>) -> (Self, mpsc::UnboundedSender<Move>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(name, rx), tx)
    }

    /// Waits for the next injected move.
    ///
    /// The move is passed through unchecked; the orchestrator rejects it
    /// if it is illegal and asks again.
    pub async fn get_move(&mut self, state: &GameState) -> Result<Move, MoveSourceError> {
        info!(player = %self.name, seat = %state.current_player(), "Waiting for input");
        match self.input_rx.recv().await {
            Some(mv) => {
                debug!(player = %self.name, mv = %mv, "Received move");
                Ok(mv)
            }
            None => Err(MoveSourceError::Disconnected),
        }
    }

    /// Player name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_sos::{Letter, Variant};

    #[tokio::test]
    async fn test_receives_injected_move() {
        let (mut player, tx) = InteractivePlayer::channel("Alice");
        let game = GameState::new(3, Variant::General).unwrap();
        tx.send(Move::new(1, 1, Letter::O)).unwrap();
        assert_eq!(player.get_move(&game).await, Ok(Move::new(1, 1, Letter::O)));
    }

    #[tokio::test]
    async fn test_closed_channel_disconnects() {
        let (mut player, tx) = InteractivePlayer::channel("Alice");
        drop(tx);
        let game = GameState::new(3, Variant::General).unwrap();
        assert_eq!(player.get_move(&game).await, Err(MoveSourceError::Disconnected));
    }
}
