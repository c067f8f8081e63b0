//! King-safety checks.
//!
//! A candidate move is tested by playing it on a scratch copy of the board
//! and scanning every enemy piece's attack squares for the mover's king.
//! The caller's board is only ever borrowed immutably here.

use tracing::warn;

use crate::engine::board::Board;
use crate::engine::movegen;
use crate::engine::types::{Color, MoveError, Square};

/// Is `target` attacked by any piece of colour `by`?
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces()
        .filter(|&(_, piece)| piece.color_of() == by)
        .any(|(sq, _)| movegen::attack_squares(board, sq, by).contains(target))
}

/// Is `color`'s king attacked on `board`?
///
/// Returns `MissingKing` when `color` has no king.
pub fn is_king_attacked(board: &Board, color: Color) -> Result<bool, MoveError> {
    let Some(king) = board.king_square(color) else {
        warn!(%color, "king lookup failed during attack scan");
        return Err(MoveError::MissingKing(color));
    };
    Ok(is_square_attacked(board, king, !color))
}

/// Would moving `from` -> `to` leave `mover`'s king attacked?
///
/// `board` is left untouched whatever the outcome.
pub fn would_expose_king(
    board: &Board,
    from: Square,
    to: Square,
    mover: Color,
) -> Result<bool, MoveError> {
    let mut scratch = *board;
    scratch.move_piece(from, to);
    is_king_attacked(&scratch, mover)
}
