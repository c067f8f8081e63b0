//! Game state and the move commit pipeline.
//!
//! `GameState` owns the board and the side to move. One call to
//! `apply_notated_move` runs parse -> candidate search -> disambiguation ->
//! king-safety check and, only if all of them pass, mutates the board and
//! flips the turn. Any failure leaves both untouched.

use tracing::{debug, info};

use crate::engine::attacks;
use crate::engine::board::Board;
use crate::engine::disambiguate;
use crate::engine::movegen;
use crate::engine::notation::{self, Notation};
use crate::engine::types::{ChessError, Color, MoveError, Piece, Square, SquareSet};

// =========================================================================
// MoveRecord
// =========================================================================

/// A committed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    /// Whether the opponent's king is attacked after the move.
    pub gives_check: bool,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.piece, self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " takes {}", captured.kind)?;
        }
        if self.gives_check {
            write!(f, ", check")?;
        }
        Ok(())
    }
}

// =========================================================================
// GameState
// =========================================================================

/// Board plus side to move for one game session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Color,
}

impl GameState {
    /// A game on `board` with White to move.
    pub fn new(board: Board) -> Self {
        Self::with_turn(board, Color::White)
    }

    /// A game on `board` with `turn` to move.
    pub fn with_turn(board: Board, turn: Color) -> Self {
        GameState { board, turn }
    }

    /// Standard starting position, White to move.
    pub fn standard() -> Self {
        Self::new(Board::standard())
    }

    /// A game from a piece-placement layout, White to move.
    pub fn from_layout(layout: &str) -> Result<Self, ChessError> {
        Ok(Self::new(Board::from_layout(layout)?))
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Pseudo-legal destinations of the piece on `sq` (move hinting).
    pub fn legal_moves(&self, sq: Square) -> SquareSet {
        match self.board.piece_at(sq) {
            Some(piece) => movegen::pseudo_legal_moves(&self.board, sq, piece.color),
            None => SquareSet::EMPTY,
        }
    }

    /// Destinations of the piece on `sq` that do not expose its own king.
    pub fn safe_moves(&self, sq: Square) -> Result<SquareSet, MoveError> {
        let Some(piece) = self.board.piece_at(sq) else {
            return Ok(SquareSet::EMPTY);
        };
        let mut safe = SquareSet::EMPTY;
        for to in movegen::pseudo_legal_moves(&self.board, sq, piece.color) {
            if !attacks::would_expose_king(&self.board, sq, to, piece.color)? {
                safe.insert(to);
            }
        }
        Ok(safe)
    }

    /// Is `color`'s king currently attacked?
    pub fn is_in_check(&self, color: Color) -> Result<bool, MoveError> {
        attacks::is_king_attacked(&self.board, color)
    }

    // -----------------------------------------------------------------
    // Commit
    // -----------------------------------------------------------------

    /// Parse, validate and play one move for the side to move.
    ///
    /// On error the board and turn are exactly as they were.
    pub fn apply_notated_move(&mut self, text: &str) -> Result<MoveRecord, MoveError> {
        let result = self
            .resolve(text)
            .and_then(|(piece, from, to)| self.commit(piece, from, to));
        if let Err(err) = &result {
            debug!(input = text, turn = %self.turn, %err, "move rejected");
        }
        result
    }

    /// Work out which piece `text` moves, and from where to where.
    fn resolve(&self, text: &str) -> Result<(Piece, Square, Square), MoveError> {
        let mover = self.turn;
        match notation::parse_move(text)? {
            Notation::Algebraic(parsed) => {
                let candidates =
                    movegen::candidate_origins(&self.board, parsed.destination, parsed.piece, mover);
                debug!(
                    input = text,
                    piece = %parsed.piece,
                    candidates = candidates.len(),
                    "resolving move"
                );
                let from = disambiguate::resolve_origin(&parsed, candidates, mover)?;
                Ok((Piece::new(mover, parsed.piece), from, parsed.destination))
            }
            Notation::Coordinate { from, to } => match self.board.piece_at(from) {
                Some(piece)
                    if piece.color == mover
                        && movegen::pseudo_legal_moves(&self.board, from, mover).contains(to) =>
                {
                    Ok((piece, from, to))
                }
                occupant => Err(MoveError::NoLegalOrigin {
                    piece: occupant.map(|p| p.kind),
                    color: mover,
                    destination: to,
                }),
            },
        }
    }

    /// Check king safety, then mutate the board and flip the turn.
    fn commit(&mut self, piece: Piece, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        let mover = self.turn;
        if attacks::would_expose_king(&self.board, from, to, mover)? {
            return Err(MoveError::SelfCheck { from, to });
        }

        let captured = self.board.move_piece(from, to);
        self.turn = !mover;
        let gives_check = matches!(attacks::is_king_attacked(&self.board, self.turn), Ok(true));

        let record = MoveRecord {
            piece,
            from,
            to,
            captured,
            gives_check,
        };
        info!(%record, "move played");
        Ok(record)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}

// =========================================================================
// Tests
// =========================================================================
