//! Pseudo-legal move generation.
//!
//! Every function here looks only at piece movement patterns and board
//! occupancy. Whether a move exposes the mover's own king is decided
//! separately by `attacks::would_expose_king`.
//!
//! Generation is parameterized by colour rather than by whose turn it is,
//! so the same code serves move validation and the opponent attack scan.

use crate::engine::board::Board;
use crate::engine::types::{Color, PieceType, Square, SquareSet};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Longest ray on an 8×8 board.
const MAX_RAY: u8 = 7;

// =========================================================================
// Public API
// =========================================================================

/// Destination squares for the piece on `from`, moving as `color`.
///
/// An empty square yields an empty set.
pub fn pseudo_legal_moves(board: &Board, from: Square, color: Color) -> SquareSet {
    let Some(piece) = board.piece_at(from) else {
        return SquareSet::EMPTY;
    };
    let mut targets = SquareSet::EMPTY;
    match piece.kind {
        PieceType::Pawn => pawn_moves(board, from, color, &mut targets),
        PieceType::Knight => knight_moves(board, from, color, &mut targets),
        PieceType::Bishop => ray_moves(board, from, color, &DIAGONALS, MAX_RAY, &mut targets),
        PieceType::Rook => ray_moves(board, from, color, &ORTHOGONALS, MAX_RAY, &mut targets),
        PieceType::Queen => ray_moves(board, from, color, &ALL_DIRECTIONS, MAX_RAY, &mut targets),
        // No castling.
        PieceType::King => ray_moves(board, from, color, &ALL_DIRECTIONS, 1, &mut targets),
    }
    targets
}

/// Squares the piece on `from` threatens, for king-safety scans.
///
/// Same as `pseudo_legal_moves` except for pawns, which threaten only their
/// two forward diagonals whatever occupies them, and never the squares
/// they push to.
pub fn attack_squares(board: &Board, from: Square, color: Color) -> SquareSet {
    match board.piece_at(from) {
        Some(piece) if piece.kind == PieceType::Pawn => pawn_attacks(from, color),
        Some(_) => pseudo_legal_moves(board, from, color),
        None => SquareSet::EMPTY,
    }
}

/// Squares holding a `color` `kind` whose pseudo-legal moves include
/// `destination`.
pub fn candidate_origins(
    board: &Board,
    destination: Square,
    kind: PieceType,
    color: Color,
) -> SquareSet {
    board
        .pieces()
        .filter(|&(_, piece)| piece.color == color && piece.kind == kind)
        .map(|(sq, _)| sq)
        .filter(|&sq| pseudo_legal_moves(board, sq, color).contains(destination))
        .collect()
}

// =========================================================================
// Pawns
// =========================================================================

fn pawn_moves(board: &Board, from: Square, color: Color, targets: &mut SquareSet) {
    let dir = color.forward();

    // --- Pushes ---
    if let Some(one) = from.offset(dir, 0)
        && board.piece_at(one).is_none()
    {
        targets.insert(one);

        // Double step only from this colour's own starting rank.
        if from.rank() == color.pawn_start_rank()
            && let Some(two) = from.offset(dir * 2, 0)
            && board.piece_at(two).is_none()
        {
            targets.insert(two);
        }
    }

    // --- Captures ---
    for to in pawn_attacks(from, color) {
        if board.piece_at(to).is_some_and(|p| p.is_enemy(color)) {
            targets.insert(to);
        }
    }

    // TODO: en passant and promotion need a move history and a promotion
    // piece in the notation before they can be generated here.
}

fn pawn_attacks(from: Square, color: Color) -> SquareSet {
    let dir = color.forward();
    [-1, 1]
        .into_iter()
        .filter_map(|df| from.offset(dir, df))
        .collect()
}

// =========================================================================
// Knights
// =========================================================================

fn knight_moves(board: &Board, from: Square, color: Color, targets: &mut SquareSet) {
    for &(dr, df) in &KNIGHT_OFFSETS {
        if let Some(to) = from.offset(dr, df)
            && board.piece_at(to).is_none_or(|p| p.is_enemy(color))
        {
            targets.insert(to);
        }
    }
}

// =========================================================================
// Rays (bishop, rook, queen; king with a one-step cap)
// =========================================================================

fn ray_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    max_steps: u8,
    targets: &mut SquareSet,
) {
    for &(dr, df) in directions {
        let mut current = from;
        for _ in 0..max_steps {
            let Some(next) = current.offset(dr, df) else {
                break;
            };
            match board.piece_at(next) {
                None => targets.insert(next),
                Some(blocker) => {
                    if blocker.is_enemy(color) {
                        targets.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
