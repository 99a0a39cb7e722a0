//! Board-level safety probes for move search.

use crate::rules::has_scoring_move;
use crate::{Board, GameState, Letter, Move};

/// Whether the seat to move in `after` has a scoring placement.
pub(super) fn opponent_can_score(after: &GameState) -> bool {
    !after.is_over() && has_scoring_move(after.board())
}

/// First move, in enumeration order, after which the next mover has no
/// scoring placement. Only meaningful on a board with no scoring move.
pub(super) fn first_quiet_move(board: &Board) -> Option<Move> {
    board.empty_cells().find_map(|at| {
        Letter::ALL.into_iter().find_map(|letter| {
            let mut next = board.clone();
            next.set(at.row, at.col, letter).ok()?;
            (!has_scoring_move(&next)).then_some(Move::new(at.row, at.col, letter))
        })
    })
}

/// Whether a safe position stays safe one exchange deeper.
///
/// `after` is the position following our safe candidate, opponent to move.
/// The opponent answers with its first quiet reply; we then need a quiet
/// move of our own. If the opponent has no quiet reply it must hand us a
/// sequence, which is just as good.
pub(super) fn survives_best_reply(after: &GameState) -> bool {
    if after.is_over() {
        return true;
    }
    let Some(reply) = first_quiet_move(after.board()) else {
        return true;
    };
    let mut board = after.board().clone();
    if board.set(reply.row, reply.col, reply.letter).is_err() {
        return false;
    }
    board.is_full() || first_quiet_move(&board).is_some()
}
