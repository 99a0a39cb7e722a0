//! S-O-S sequence detection.

use super::super::{Board, Coord, Letter, Seat};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Line directions checked through a placed cell.
const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal down-right
    (1, -1), // Diagonal down-left
];

/// A completed S-O-S line, identified by its two S endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Sequence {
    /// First S.
    pub start: Coord,
    /// Last S.
    pub end: Coord,
    /// Seat whose move completed the line.
    pub owner: Seat,
}

/// Visits every S-O-S line that `letter` at `at` would complete, treating
/// `at` as holding `letter` whatever the board currently says there.
fn scan(board: &Board, at: Coord, letter: Letter, mut found: impl FnMut(Coord, Coord)) {
    for (dr, dc) in DIRECTIONS {
        match letter {
            Letter::S => {
                // `at` opens the line
                if board.letter_at_offset(at, dr, dc, 1) == Some(Letter::O)
                    && board.letter_at_offset(at, dr, dc, 2) == Some(Letter::S)
                    && let Some(end) = board.offset(at, dr, dc, 2)
                {
                    found(at, end);
                }
                // `at` closes the line
                if board.letter_at_offset(at, dr, dc, -1) == Some(Letter::O)
                    && board.letter_at_offset(at, dr, dc, -2) == Some(Letter::S)
                    && let Some(start) = board.offset(at, dr, dc, -2)
                {
                    found(start, at);
                }
            }
            Letter::O => {
                if board.letter_at_offset(at, dr, dc, -1) == Some(Letter::S)
                    && board.letter_at_offset(at, dr, dc, 1) == Some(Letter::S)
                    && let (Some(start), Some(end)) =
                        (board.offset(at, dr, dc, -1), board.offset(at, dr, dc, 1))
                {
                    found(start, end);
                }
            }
        }
    }
}

/// Finds every sequence completed by the letter just written at `at`.
///
/// Returns between zero and eight records; nothing is deduplicated across
/// directions. Has no side effects.
#[instrument(skip(board), fields(size = board.size()))]
pub fn find_sequences(board: &Board, at: Coord, letter: Letter, owner: Seat) -> Vec<Sequence> {
    debug_assert_eq!(
        board.get(at.row, at.col).ok().and_then(|c| c.letter()),
        Some(letter),
        "sequence detection must run on the cell just written"
    );
    let mut sequences = Vec::new();
    scan(board, at, letter, |start, end| {
        sequences.push(Sequence::new(start, end, owner));
    });
    sequences
}

/// Counts the sequences `letter` would complete if placed at `at`.
///
/// Pure probe used by move search; the board is not modified.
pub fn count_if_placed(board: &Board, at: Coord, letter: Letter) -> usize {
    let mut count = 0;
    scan(board, at, letter, |_, _| count += 1);
    count
}

/// Checks whether any empty cell admits a scoring placement.
pub fn has_scoring_move(board: &Board) -> bool {
    board
        .empty_cells()
        .any(|at| Letter::ALL.iter().any(|&l| count_if_placed(board, at, l) > 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, letters: &[(usize, usize, Letter)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(r, c, l) in letters {
            board.set(r, c, l).unwrap();
        }
        board
    }

    #[test]
    fn test_s_closes_row() {
        let board = board_with(3, &[(0, 0, Letter::S), (0, 1, Letter::O), (0, 2, Letter::S)]);
        let found = find_sequences(&board, Coord::new(0, 2), Letter::S, Seat::One);
        assert_eq!(found, vec![Sequence::new(Coord::new(0, 0), Coord::new(0, 2), Seat::One)]);
    }

    #[test]
    fn test_s_opens_column() {
        let board = board_with(3, &[(1, 2, Letter::O), (2, 2, Letter::S), (0, 2, Letter::S)]);
        let found = find_sequences(&board, Coord::new(0, 2), Letter::S, Seat::Two);
        assert_eq!(found, vec![Sequence::new(Coord::new(0, 2), Coord::new(2, 2), Seat::Two)]);
    }

    #[test]
    fn test_o_in_middle_of_anti_diagonal() {
        let board = board_with(3, &[(0, 2, Letter::S), (2, 0, Letter::S), (1, 1, Letter::O)]);
        let found = find_sequences(&board, Coord::new(1, 1), Letter::O, Seat::One);
        assert_eq!(found, vec![Sequence::new(Coord::new(0, 2), Coord::new(2, 0), Seat::One)]);
    }

    #[test]
    fn test_o_surrounded_by_s_completes_four() {
        let mut letters: Vec<(usize, usize, Letter)> = Vec::new();
        for r in 1..=3 {
            for c in 1..=3 {
                if (r, c) != (2, 2) {
                    letters.push((r, c, Letter::S));
                }
            }
        }
        letters.push((2, 2, Letter::O));
        let board = board_with(5, &letters);
        let found = find_sequences(&board, Coord::new(2, 2), Letter::O, Seat::One);
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_s_can_both_open_and_close() {
        // S O [S] O S along row 0
        let board = board_with(
            5,
            &[
                (0, 0, Letter::S),
                (0, 1, Letter::O),
                (0, 3, Letter::O),
                (0, 4, Letter::S),
                (0, 2, Letter::S),
            ],
        );
        let found = find_sequences(&board, Coord::new(0, 2), Letter::S, Seat::Two);
        assert_eq!(found.len(), 2);
        assert!(found.contains(&Sequence::new(Coord::new(0, 0), Coord::new(0, 2), Seat::Two)));
        assert!(found.contains(&Sequence::new(Coord::new(0, 2), Coord::new(0, 4), Seat::Two)));
    }

    #[test]
    fn test_edges_do_not_wrap() {
        // (0,2) and (1,0) are neighbours in row-major storage, not on the board
        let board = board_with(3, &[(0, 2, Letter::S), (1, 0, Letter::O), (1, 1, Letter::S)]);
        let found = find_sequences(&board, Coord::new(1, 1), Letter::S, Seat::One);
        assert!(found.is_empty());
    }

    #[test]
    fn test_probe_matches_detection() {
        let board = board_with(3, &[(0, 0, Letter::S), (0, 2, Letter::S)]);
        assert_eq!(count_if_placed(&board, Coord::new(0, 1), Letter::O), 1);
        assert_eq!(count_if_placed(&board, Coord::new(0, 1), Letter::S), 0);
        assert!(has_scoring_move(&board));
        assert!(!has_scoring_move(&Board::new(3).unwrap()));
    }
}
