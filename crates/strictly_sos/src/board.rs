//! Square SOS board with bounds- and occupancy-checked access.

use super::{Cell, Coord, Letter, MoveError};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Smallest supported board side length.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board side length.
pub const MAX_BOARD_SIZE: usize = 12;

/// Requested board size is outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Board size {size} is outside {}..={}", MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
pub struct BoardSizeError {
    /// The rejected size.
    pub size: usize,
}

/// N x N SOS board.
///
/// Cells only ever move from `Empty` to `Filled`; [`Board::set`] is the
/// sole mutator and refuses to overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board with the given side length.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, BoardSizeError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardSizeError { size });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, MoveError> {
        if row >= self.size || col >= self.size {
            return Err(MoveError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    /// Returns the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, MoveError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Writes `letter` into an empty cell.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if the coordinate is off the board, `CellOccupied` if
    /// the cell already holds a letter. The board is untouched on error.
    pub fn set(&mut self, row: usize, col: usize, letter: Letter) -> Result<(), MoveError> {
        let i = self.index(row, col)?;
        if self.cells[i] != Cell::Empty {
            return Err(MoveError::CellOccupied(Coord::new(row, col)));
        }
        self.cells[i] = Cell::Filled(letter);
        Ok(())
    }

    /// Checks whether `(row, col)` is on the board and empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Ok(Cell::Empty))
    }

    /// Checks if no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Number of cells holding a letter.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Letter at `from + steps * (dr, dc)`, or `None` if that cell is off
    /// the board or empty.
    pub(crate) fn letter_at_offset(
        &self,
        from: Coord,
        dr: isize,
        dc: isize,
        steps: isize,
    ) -> Option<Letter> {
        let coord = self.offset(from, dr, dc, steps)?;
        self.cells[coord.row * self.size + coord.col].letter()
    }

    /// Coordinate at `from + steps * (dr, dc)` if it lies on the board.
    pub(crate) fn offset(&self, from: Coord, dr: isize, dc: isize, steps: isize) -> Option<Coord> {
        let row = from.row as isize + dr * steps;
        let col = from.col as isize + dc * steps;
        let size = self.size as isize;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Coord::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Empty coordinates in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| Coord::new(i / self.size, i % self.size))
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Row-major grid of single-character cells (`S`, `O`, `_`).
    pub fn to_grid(&self) -> Vec<Vec<char>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    /// Formats the board as a human-readable string with row and column
    /// headers.
    pub fn display(&self) -> String {
        let mut result = String::from("   ");
        for col in 0..self.size {
            result.push_str(&format!("{:>3}", col));
        }
        for (r, row) in self.rows().enumerate() {
            result.push('\n');
            result.push_str(&format!("{:>3}", r));
            for cell in row {
                result.push_str(&format!("{:>3}", cell.symbol()));
            }
        }
        result
    }
}
