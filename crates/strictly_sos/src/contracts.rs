//! Contract-based validation for SOS moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, action)} action {Q(before, after)}.

use super::invariants::{InvariantSet, InvariantViolation, SosInvariants};
use super::{Cell, Coord, GameState, MoveError, Placement};
use tracing::instrument;

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Precondition: the game has not ended.
pub struct GameNotOver;

impl GameNotOver {
    /// Checks the precondition.
    pub fn check(game: &GameState) -> Result<(), MoveError> {
        if game.is_over() {
            Err(MoveError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the seat's turn.
pub struct SeatsTurn;

impl SeatsTurn {
    /// Checks the precondition.
    pub fn check(placement: &Placement, game: &GameState) -> Result<(), MoveError> {
        if placement.seat != game.current_player() {
            Err(MoveError::WrongTurn(placement.seat))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is on the board and empty.
pub struct CellIsOpen;

impl CellIsOpen {
    /// Checks the precondition.
    pub fn check(placement: &Placement, game: &GameState) -> Result<(), MoveError> {
        let mv = placement.mv;
        match game.board().get(mv.row, mv.col)? {
            Cell::Empty => Ok(()),
            Cell::Filled(_) => Err(MoveError::CellOccupied(Coord::new(mv.row, mv.col))),
        }
    }
}

/// Composite precondition for a legal move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions, game-over first.
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &GameState) -> Result<(), MoveError> {
        GameNotOver::check(game)?;
        SeatsTurn::check(placement, game)?;
        CellIsOpen::check(placement, game)?;
        Ok(())
    }
}

/// Contract for move actions.
///
/// Postconditions, beyond the state invariants:
/// - exactly one more cell is filled and no filled cell changed
/// - scores never decrease
/// - a finished game stays finished
pub struct MoveContract;

impl MoveContract {
    fn transition_violations(before: &GameState, after: &GameState) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        let kept = before
            .board()
            .rows()
            .flatten()
            .zip(after.board().rows().flatten())
            .all(|(b, a)| *b == Cell::Empty || b == a);
        if !kept || after.board().filled_count() != before.board().filled_count() + 1 {
            violations.push(InvariantViolation::new(
                "Exactly one empty cell filled, no filled cell changed",
            ));
        }

        let (b1, b2) = before.scores();
        let (a1, a2) = after.scores();
        if a1 < b1 || a2 < b2 {
            violations.push(InvariantViolation::new("Scores never decrease"));
        }

        if before.is_over() && !after.is_over() {
            violations.push(InvariantViolation::new("Game over is permanent"));
        }

        violations
    }
}

impl Contract<GameState, Placement> for MoveContract {
    fn pre(game: &GameState, action: &Placement) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Self::transition_violations(before, after);
        if let Err(found) = SosInvariants::check_all(after) {
            violations.extend(found);
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Letter, Move, Seat, Variant};

    fn placement(seat: Seat, row: usize, col: usize, letter: Letter) -> Placement {
        Placement {
            seat,
            mv: Move::new(row, col, letter),
        }
    }

    #[test]
    fn test_precondition_empty_cell() {
        let game = GameState::new(3, Variant::General).unwrap();
        assert!(MoveContract::pre(&game, &placement(Seat::One, 1, 1, Letter::S)).is_ok());
    }

    #[test]
    fn test_precondition_out_of_bounds() {
        let game = GameState::new(3, Variant::General).unwrap();
        assert!(matches!(
            MoveContract::pre(&game, &placement(Seat::One, 3, 1, Letter::S)),
            Err(MoveError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = GameState::new(3, Variant::General).unwrap();
        assert_eq!(
            MoveContract::pre(&game, &placement(Seat::Two, 0, 0, Letter::O)),
            Err(MoveError::WrongTurn(Seat::Two))
        );
    }

    #[test]
    fn test_game_over_checked_first() {
        let mut game = GameState::new(3, Variant::Simple).unwrap();
        for mv in [
            Move::new(0, 0, Letter::S),
            Move::new(0, 1, Letter::O),
            Move::new(0, 2, Letter::S),
        ] {
            game.place_move(mv).unwrap();
        }
        assert!(game.is_over());
        // Occupied cell and wrong seat, but game over wins
        assert_eq!(
            MoveContract::pre(&game, &placement(Seat::Two, 0, 0, Letter::S)),
            Err(MoveError::GameAlreadyOver)
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameState::new(3, Variant::General).unwrap();
        let mut after = before.clone();
        after.place_move(Move::new(1, 1, Letter::O)).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_placement() {
        let before = GameState::new(3, Variant::General).unwrap();
        let violations = MoveContract::post(&before, &before.clone()).unwrap_err();
        assert_eq!(violations.len(), 1);
    }
}
