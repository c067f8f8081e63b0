use serde::Serialize;

use crate::engine::game::GameState;
use crate::engine::types::{Color, Square};

/// JSON view of a game: the grid, the side to move and the placement string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// Row 0 = rank 8, column 0 = file a. `"wP"`, `"bK"`, or `""` when empty.
    pub board: Vec<Vec<String>>,
    pub turn: String,
    pub layout: String,
}

impl BoardSnapshot {
    pub fn from_game(game: &GameState) -> Self {
        let board = (0..8u8)
            .map(|rank| {
                (0..8u8)
                    .map(|file| match game.piece_at(Square::new(rank, file)) {
                        Some(piece) => format!(
                            "{}{}",
                            color_code(piece.color),
                            piece.kind.to_char(Color::White)
                        ),
                        None => String::new(),
                    })
                    .collect()
            })
            .collect();

        BoardSnapshot {
            board,
            turn: game.current_turn().to_string(),
            layout: game.board().to_layout(),
        }
    }
}

fn color_code(c: Color) -> char {
    match c {
        Color::White => 'w',
        Color::Black => 'b',
    }
}
