//! Core domain types for SOS.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A letter that can be placed on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Letter {
    /// The letter S (ends of a sequence).
    #[display("S")]
    S,
    /// The letter O (middle of a sequence).
    #[display("O")]
    O,
}

impl Letter {
    /// Both letters, S first. Move enumeration relies on this order.
    pub const ALL: [Letter; 2] = [Letter::S, Letter::O];

    /// Returns the single-character symbol for this letter.
    pub fn symbol(self) -> char {
        match self {
            Letter::S => 'S',
            Letter::O => 'O',
        }
    }

    /// Parses a letter from a character, ignoring ASCII case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'S' => Some(Letter::S),
            'O' => Some(Letter::O),
            _ => None,
        }
    }
}

/// A cell on the SOS board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Cell holding a letter.
    Filled(Letter),
}

impl Cell {
    /// Returns the letter in this cell, if any.
    pub fn letter(self) -> Option<Letter> {
        match self {
            Cell::Empty => None,
            Cell::Filled(letter) => Some(letter),
        }
    }

    /// Single-character rendering, `_` for empty cells.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::Filled(letter) => letter.symbol(),
        }
    }
}

/// One of the two seats at the table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Seat {
    /// Player 1 (moves first).
    #[display("Player 1")]
    One,
    /// Player 2.
    #[display("Player 2")]
    Two,
}

impl Seat {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Player number, 1 or 2.
    pub fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }

    /// Zero-based index into per-seat arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

/// Rule variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Variant {
    /// Game ends on the first completed sequence.
    Simple,
    /// Play continues until the board is full; scoring earns another turn.
    #[default]
    General,
}

/// A (row, column) board coordinate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
    derive_new::new,
)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_letter_from_char() {
        assert_eq!(Letter::from_char('s'), Some(Letter::S));
        assert_eq!(Letter::from_char('O'), Some(Letter::O));
        assert_eq!(Letter::from_char('X'), None);
    }

    #[test]
    fn test_seat_opponent_and_number() {
        assert_eq!(Seat::One.opponent(), Seat::Two);
        assert_eq!(Seat::Two.opponent(), Seat::One);
        assert_eq!(Seat::One.number(), 1);
        assert_eq!(Seat::Two.number(), 2);
    }

    #[test]
    fn test_variant_parses_case_insensitive() {
        assert_eq!(Variant::from_str("simple").unwrap(), Variant::Simple);
        assert_eq!(Variant::from_str("General").unwrap(), Variant::General);
        assert!(Variant::from_str("blitz").is_err());
        assert_eq!(Variant::General.to_string(), "general");
    }

    #[test]
    fn test_cell_symbols() {
        assert_eq!(Cell::Empty.symbol(), '_');
        assert_eq!(Cell::Filled(Letter::S).symbol(), 'S');
        assert_eq!(Cell::Filled(Letter::O).letter(), Some(Letter::O));
    }
}
