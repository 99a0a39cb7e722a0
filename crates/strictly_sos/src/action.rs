//! First-class action types for SOS.
//!
//! Moves are domain events: a letter placed at a coordinate. They can be
//! validated before application, logged, and exchanged as text tokens
//! of the form `R{row}C{col}L{letter}`.

use super::{Coord, Letter, Seat};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A move in SOS: a letter placed at a board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Target row.
    pub row: usize,
    /// Target column.
    pub col: usize,
    /// Letter to place.
    pub letter: Letter,
}

impl Move {
    /// Creates a new move.
    pub fn new(row: usize, col: usize, letter: Letter) -> Self {
        Self { row, col, letter }
    }

    /// Returns the target coordinate.
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// Formats the move as an `R{row}C{col}L{letter}` token.
    pub fn to_token(&self) -> String {
        format!("R{}C{}L{}", self.row, self.col, self.letter)
    }

    /// Finds the first `R<digits>C<digits>L<S|O>` token embedded in `text`.
    ///
    /// Surrounding text is ignored, so a chatty reply such as
    /// `"I'll play R2C3LO."` still yields a move.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn find_token(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        (0..bytes.len())
            .filter(|&i| bytes[i] == b'R')
            .find_map(|i| parse_token_prefix(&bytes[i..]))
    }
}

/// Parses a token anchored at the start of `bytes`.
fn parse_token_prefix(bytes: &[u8]) -> Option<Move> {
    let rest = bytes.strip_prefix(b"R")?;
    let (row, rest) = take_number(rest)?;
    let rest = rest.strip_prefix(b"C")?;
    let (col, rest) = take_number(rest)?;
    let rest = rest.strip_prefix(b"L")?;
    let letter = match rest.first()? {
        b'S' => Letter::S,
        b'O' => Letter::O,
        _ => return None,
    };
    Some(Move::new(row, col, letter))
}

fn take_number(bytes: &[u8]) -> Option<(usize, &[u8])> {
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let text = std::str::from_utf8(&bytes[..digits]).ok()?;
    let value = text.parse().ok()?;
    Some((value, &bytes[digits..]))
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.letter, self.coord())
    }
}

/// Error parsing a move from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Cannot parse move from {input:?}: expected R<row>C<col>L<S|O> or \"<row> <col> <S|O>\"")]
pub struct MoveParseError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Accepts either a full token (`R1C2LS`, case-insensitive) or a
    /// whitespace-separated triple (`1 2 S`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || MoveParseError {
            input: s.to_string(),
        };

        let upper = trimmed.to_ascii_uppercase();
        if let Some(mv) = parse_token_prefix(upper.as_bytes()) {
            if mv.to_token().len() == upper.len() {
                return Ok(mv);
            }
            return Err(err());
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let [row, col, letter] = parts.as_slice() else {
            return Err(err());
        };
        let row = row.parse().map_err(|_| err())?;
        let col = col.parse().map_err(|_| err())?;
        let mut chars = letter.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => Letter::from_char(c).ok_or_else(err)?,
            _ => return Err(err()),
        };
        Ok(Move::new(row, col, letter))
    }
}

/// A move as recorded in history, tagged with the seat that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Seat that made the move.
    pub seat: Seat,
    /// The move itself.
    pub mv: Move,
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Coordinate lies outside the board.
    #[display("Cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board side length.
        size: usize,
    },

    /// The cell already holds a letter.
    #[display("Cell {_0} is already occupied")]
    CellOccupied(#[error(not(source))] Coord),

    /// The letter is neither S nor O.
    #[display("Invalid letter {_0:?}: only S or O may be placed")]
    InvalidLetter(#[error(not(source))] char),

    /// A seat tried to move out of turn.
    #[display("It's not {_0}'s turn")]
    WrongTurn(#[error(not(source))] Seat),

    /// The game is already over.
    #[display("Game is already over")]
    GameAlreadyOver,
}
