//! Variant-parameterized SOS state machine.
//!
//! A single [`GameState`] serves both rule variants. The variant tag is
//! consulted only in the post-move transition rule, see
//! [`rules::transition`](crate::rules::transition).

use super::contracts::{Contract, MoveContract};
use super::rules::{Sequence, find_sequences, transition};
use super::{
    Board, BoardSizeError, Cell, GameStatus, Letter, Move, MoveError, Outcome, Placement, Seat,
    Variant,
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Complete SOS game state.
///
/// `Clone` is a deep copy: board cells, sequence log and history are owned
/// vectors, so a clone never observes later mutation of its source and
/// vice versa. Move search relies on this to simulate on private copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    variant: Variant,
    current_player: Seat,
    scores: [u32; 2],
    last_move_sequences: usize,
    over: bool,
    sequences: Vec<Sequence>,
    history: Vec<Placement>,
    sequence_notice_shown: bool,
}

/// Facts about a successfully applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Seat that moved.
    pub seat: Seat,
    /// Sequences completed by this move.
    pub sequences: Vec<Sequence>,
    /// Seat holding the turn afterwards.
    pub next_to_move: Seat,
    /// Scores after the move, (player 1, player 2).
    pub scores: (u32, u32),
    /// The move ended the game.
    pub game_over: bool,
}

/// Error rebuilding a game from a move list.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ReplayError {
    /// The board size was rejected.
    #[display("{_0}")]
    BoardSize(BoardSizeError),
    /// A move in the list was illegal at its point in the game.
    #[display("Move {index} rejected: {source}")]
    Move {
        /// Position of the offending move in the list.
        index: usize,
        /// Why it was rejected.
        source: MoveError,
    },
}

impl From<BoardSizeError> for ReplayError {
    fn from(err: BoardSizeError) -> Self {
        ReplayError::BoardSize(err)
    }
}

impl GameState {
    /// Creates a game with an empty `size` x `size` board and player 1 to
    /// move.
    #[instrument]
    pub fn new(size: usize, variant: Variant) -> Result<Self, BoardSizeError> {
        let board = Board::new(size)?;
        info!(size, %variant, "Created SOS game");
        Ok(Self {
            board,
            variant,
            current_player: Seat::One,
            scores: [0, 0],
            last_move_sequences: 0,
            over: false,
            sequences: Vec::new(),
            history: Vec::new(),
            sequence_notice_shown: false,
        })
    }

    /// Rebuilds a game by applying `moves` in order, each by the seat
    /// holding the turn at that point.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(size: usize, variant: Variant, moves: &[Move]) -> Result<Self, ReplayError> {
        let mut game = Self::new(size, variant)?;
        for (index, mv) in moves.iter().enumerate() {
            game.place_move(*mv)
                .map_err(|source| ReplayError::Move { index, source })?;
        }
        Ok(game)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side length of the board.
    pub fn board_size(&self) -> usize {
        self.board.size()
    }

    /// Returns the rule variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the seat holding the turn.
    pub fn current_player(&self) -> Seat {
        self.current_player
    }

    /// Scores as (player 1, player 2).
    pub fn scores(&self) -> (u32, u32) {
        (self.scores[0], self.scores[1])
    }

    /// Score of one seat.
    pub fn score(&self, seat: Seat) -> u32 {
        self.scores[seat.index()]
    }

    /// Number of sequences completed by the most recent move.
    pub fn last_move_sequence_count(&self) -> usize {
        self.last_move_sequences
    }

    /// Checks if the game has ended.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Every sequence completed so far, in completion order.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Every successful placement, in order.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Whether the notice for the latest scoring move has been shown.
    pub fn sequence_notice_shown(&self) -> bool {
        self.sequence_notice_shown
    }

    /// Records that the notice for the latest scoring move was shown.
    pub fn mark_sequence_notice_shown(&mut self) {
        self.sequence_notice_shown = true;
    }

    /// Final outcome, or `None` while the game is running.
    pub fn outcome(&self) -> Option<Outcome> {
        self.over.then(|| Outcome::from_scores(self.scores()))
    }

    /// Winner as a player number: 1 or 2, or 0 for a draw.
    ///
    /// Also 0 while the game is still running; callers that need to tell
    /// "undetermined" from "draw" should use [`GameState::outcome`].
    pub fn winner_number(&self) -> u8 {
        self.outcome()
            .and_then(|o| o.winner())
            .map_or(0, |seat| seat.number())
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        match self.outcome() {
            Some(outcome) => GameStatus::Over(outcome),
            None => GameStatus::InProgress {
                to_move: self.current_player,
            },
        }
    }

    /// Every legal move: each empty cell with S then O, row-major.
    ///
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.over {
            return Vec::new();
        }
        self.board
            .empty_cells()
            .flat_map(|at| Letter::ALL.map(|letter| Move::new(at.row, at.col, letter)))
            .collect()
    }

    /// Places a move for the seat holding the turn.
    pub fn place_move(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        self.place_move_as(self.current_player, mv)
    }

    /// Places a letter given as a raw character.
    ///
    /// Validation order: game over, bounds, occupancy, then letter.
    #[instrument(skip(self))]
    pub fn place_letter(
        &mut self,
        row: usize,
        col: usize,
        letter: char,
    ) -> Result<MoveOutcome, MoveError> {
        if self.over {
            return Err(MoveError::GameAlreadyOver);
        }
        if let Cell::Filled(_) = self.board.get(row, col)? {
            return Err(MoveError::CellOccupied(crate::Coord::new(row, col)));
        }
        let letter = match letter {
            'S' => Letter::S,
            'O' => Letter::O,
            other => return Err(MoveError::InvalidLetter(other)),
        };
        self.place_move(Move::new(row, col, letter))
    }

    /// Places a move on behalf of `seat`.
    ///
    /// This is the single mutation entry point. On error the state is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver`, `WrongTurn`, `OutOfBounds` or `CellOccupied`.
    #[instrument(skip(self), fields(variant = %self.variant, seat = %seat, mv = %mv))]
    pub fn place_move_as(&mut self, seat: Seat, mv: Move) -> Result<MoveOutcome, MoveError> {
        let placement = Placement { seat, mv };
        MoveContract::pre(self, &placement).inspect_err(|e| {
            debug!(error = %e, "Move rejected");
        })?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.set(mv.row, mv.col, mv.letter)?;
        self.sequence_notice_shown = false;
        self.history.push(placement);

        let found = find_sequences(&self.board, mv.coord(), mv.letter, seat);
        let count = found.len();
        self.last_move_sequences = count;
        self.scores[seat.index()] += count as u32;
        self.sequences.extend_from_slice(&found);

        let next = transition(self.variant, count, self.board.is_full());
        if !next.keep_turn {
            self.current_player = seat.opponent();
        }
        if next.game_over {
            self.over = true;
        }

        #[cfg(debug_assertions)]
        {
            if let Err(violations) = MoveContract::post(&before, self) {
                panic!("Move postcondition failed: {violations:?}");
            }
        }

        debug!(
            sequences = count,
            next = %self.current_player,
            over = self.over,
            "Move applied"
        );
        if self.over {
            info!(scores = ?self.scores(), outcome = ?self.outcome(), "Game over");
        }

        Ok(MoveOutcome {
            seat,
            sequences: found,
            next_to_move: self.current_player,
            scores: self.scores(),
            game_over: self.over,
        })
    }
}
