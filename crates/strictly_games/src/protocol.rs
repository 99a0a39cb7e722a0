//! Wire format for asking an external oracle for a move.
//!
//! A request carries a natural-language objective, the board as a
//! row-major grid of single characters (`S`, `O`, `_`) and the closed set
//! of legal move tokens `R{row}C{col}L{S|O}`. A reply names one token in
//! `result`, or explains a failure in `error`.

use serde::{Deserialize, Serialize};
use strictly_sos::{GameState, Variant};

/// Request sent to a remote move oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMoveRequest {
    /// Instructions describing the game and the task.
    pub prompt: String,
    /// Board cells, row-major.
    pub board: Vec<Vec<char>>,
    /// Every legal move as a token, one per empty cell and letter.
    pub moves: Vec<String>,
}

/// Reply from a remote move oracle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMoveReply {
    /// The chosen move token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RemoteMoveRequest {
    /// Builds the request for the seat holding the turn in `state`.
    pub fn for_state(state: &GameState) -> Self {
        Self {
            prompt: objective(state),
            board: state.board().to_grid(),
            moves: state.legal_moves().iter().map(|mv| mv.to_token()).collect(),
        }
    }

    /// Board as space-separated rows.
    pub fn board_text(&self) -> String {
        grid_text(&self.board)
    }
}

fn grid_text(grid: &[Vec<char>]) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Objective text for the seat holding the turn.
fn objective(state: &GameState) -> String {
    let size = state.board_size();
    let (p1, p2) = state.scores();
    let ending = match state.variant() {
        Variant::Simple => "The first player to form an SOS wins immediately.",
        Variant::General => {
            "Each SOS formed scores a point and earns another turn. \
             The game ends when the board is full; the most SOS sequences wins."
        }
    };
    let board = grid_text(&state.board().to_grid());

    format!(
        "You are an expert SOS player.\n\
         The game is played on a {size}x{size} grid. Players take turns placing \
         an 'S' or an 'O' in an empty cell, and form \"SOS\" horizontally, \
         vertically or diagonally.\n\
         {ending}\n\n\
         You are {seat}. Score: Player 1 {p1}, Player 2 {p2}.\n\n\
         Current board (_ is empty, rows and columns start at 0):\n\n\
         {board}\n\n\
         Strategy:\n\
         1. Complete an SOS if you can.\n\
         2. Otherwise avoid leaving S _ S or S O _ patterns the opponent can complete.\n\
         3. Otherwise keep future options open.\n\n\
         Answer with exactly one move token R<row>C<col>L<S|O> from the legal move list.",
        seat = state.current_player(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_sos::{Letter, Move};

    #[test]
    fn test_request_lists_every_legal_move() {
        let game = GameState::replay(3, Variant::General, &[Move::new(0, 0, Letter::S)]).unwrap();
        let request = RemoteMoveRequest::for_state(&game);
        assert_eq!(request.moves.len(), 16);
        assert_eq!(request.moves[0], "R0C1LS");
        assert_eq!(request.moves[1], "R0C1LO");
        assert!(!request.moves.contains(&"R0C0LS".to_string()));
        assert_eq!(request.board[0], vec!['S', '_', '_']);
        assert_eq!(request.board_text(), "S _ _\n_ _ _\n_ _ _");
        assert!(request.prompt.contains("Player 2"));
        assert!(request.prompt.contains("3x3"));
    }

    #[test]
    fn test_request_json_shape() {
        let game = GameState::new(3, Variant::Simple).unwrap();
        let json = serde_json::to_value(RemoteMoveRequest::for_state(&game)).unwrap();
        assert_eq!(json["board"][1][1], "_");
        assert_eq!(json["moves"].as_array().unwrap().len(), 18);
        assert!(json["prompt"].as_str().unwrap().contains("wins immediately"));
    }

    #[test]
    fn test_reply_parses_result_or_error() {
        let ok: RemoteMoveReply = serde_json::from_str(r#"{"result":"R1C1LO"}"#).unwrap();
        assert_eq!(ok.result.as_deref(), Some("R1C1LO"));
        assert_eq!(ok.error, None);

        let err: RemoteMoveReply =
            serde_json::from_str(r#"{"error":"No available moves."}"#).unwrap();
        assert_eq!(err.result, None);
        assert_eq!(err.error.as_deref(), Some("No available moves."));
    }
}
