//! Mailbox board representation.
//!
//! `Board` is a fixed 8×8 grid of optional pieces indexed by internal
//! `(rank, file)`, rank 0 being the top row as printed (rank 8). It carries
//! no rules: `move_piece` relocates whatever is on a square without asking
//! whether the move is legal.

use crate::engine::types::{ChessError, Color, Piece, PieceType, Square, file_letter, rank_digit};

/// Placement field of the standard chess starting position.
pub const STANDARD_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// An 8×8 board. No invariant is enforced on piece counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting position.
    pub fn standard() -> Self {
        Self::from_layout(STANDARD_LAYOUT).expect("standard layout is always valid")
    }

    /// Parse a FEN-style piece placement field, rank 8 first.
    ///
    /// Only the placement is read; side to move always starts as White.
    /// Boards without kings (or with several) are accepted.
    pub fn from_layout(layout: &str) -> Result<Self, ChessError> {
        let ranks: Vec<&str> = layout.trim().split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidLayout(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (rank, rank_str) in ranks.iter().enumerate() {
            let rank = rank as u8;
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if file > 7 {
                    return Err(ChessError::InvalidLayout(format!(
                        "too many squares in rank {}",
                        rank_digit(rank)
                    )));
                }
                if let Some(digit) = ch.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(ChessError::InvalidLayout(format!(
                            "invalid empty count '{ch}' in rank {}",
                            rank_digit(rank)
                        )));
                    }
                    file += digit as u8;
                } else if let Some(piece) = Piece::from_char(ch) {
                    board.put(Square::new(rank, file), piece);
                    file += 1;
                } else {
                    return Err(ChessError::InvalidLayout(format!(
                        "invalid character '{ch}' in piece placement"
                    )));
                }
            }
            if file != 8 {
                return Err(ChessError::InvalidLayout(format!(
                    "rank {} has {} squares instead of 8",
                    rank_digit(rank),
                    file
                )));
            }
        }
        Ok(board)
    }

    /// Export the placement field (inverse of `from_layout`).
    pub fn to_layout(&self) -> String {
        let mut layout = String::with_capacity(72);
        for rank in 0..8u8 {
            let mut empty_count = 0u8;
            for file in 0..8u8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            layout.push((b'0' + empty_count) as char);
                            empty_count = 0;
                        }
                        layout.push(piece.to_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                layout.push((b'0' + empty_count) as char);
            }
            if rank < 7 {
                layout.push('/');
            }
        }
        layout
    }

    /// Place a piece, replacing any occupant.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.rank() as usize][sq.file() as usize] = Some(piece);
    }

    /// Empty a square, returning what was on it.
    #[inline]
    pub fn clear(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize].take()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Queries and the single mutator
// ---------------------------------------------------------------------------

impl Board {
    /// What piece (if any) is on a given square?
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    /// True iff both coordinates lie in `[0, 8)`.
    #[inline]
    pub fn is_within_bounds(rank: i8, file: i8) -> bool {
        (0..8).contains(&rank) && (0..8).contains(&file)
    }

    /// Relocate whatever occupies `from` to `to`, clearing `from`.
    ///
    /// Any occupant of `to` is overwritten and returned. No legality check.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.clear(from);
        let captured = self.clear(to);
        if let Some(piece) = moving {
            self.put(to, piece);
        }
        captured
    }

    /// Occupied squares with their pieces, rank 8 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Square of `color`'s king, or `None` if that side has no king.
    /// With several kings the first in rank-8-first order is returned.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, p)| p == Piece::new(color, PieceType::King))
            .map(|(sq, _)| sq)
    }

    // -----------------------------------------------------------------------
    // Text rendering
    // -----------------------------------------------------------------------

    /// Render the board as a text grid (rank 8 at top).
    pub fn render(&self) -> String {
        let mut s = String::with_capacity(200);
        for rank in 0..8u8 {
            s.push(rank_digit(rank));
            s.push(' ');
            for file in 0..8u8 {
                let ch = match self.piece_at(Square::new(rank, file)) {
                    Some(piece) => piece.to_char(),
                    None => '.',
                };
                s.push(ch);
                if file < 7 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  ");
        for file in 0..8u8 {
            s.push(file_letter(file));
            if file < 7 {
                s.push(' ');
            }
        }
        s
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn white(kind: PieceType) -> Option<Piece> {
        Some(Piece::new(Color::White, kind))
    }

    fn black(kind: PieceType) -> Option<Piece> {
        Some(Piece::new(Color::Black, kind))
    }

    // ===================================================================
    // Standard layout
    // ===================================================================

    #[test]
    fn standard_layout_round_trip() {
        assert_eq!(Board::standard().to_layout(), STANDARD_LAYOUT);
    }

    #[test]
    fn standard_piece_count() {
        assert_eq!(Board::standard().pieces().count(), 32);
    }

    #[test]
    fn piece_at_standard_squares() {
        let board = Board::standard();
        assert_eq!(board.piece_at(sq("e1")), white(PieceType::King));
        assert_eq!(board.piece_at(sq("d1")), white(PieceType::Queen));
        assert_eq!(board.piece_at(sq("d8")), black(PieceType::Queen));
        assert_eq!(board.piece_at(sq("g1")), white(PieceType::Knight));
        assert_eq!(board.piece_at(sq("h8")), black(PieceType::Rook));
        for file in 'a'..='h' {
            assert_eq!(board.piece_at(sq(&format!("{file}2"))), white(PieceType::Pawn));
            assert_eq!(board.piece_at(sq(&format!("{file}7"))), black(PieceType::Pawn));
            for rank in 3..=6 {
                assert_eq!(board.piece_at(sq(&format!("{file}{rank}"))), None);
            }
        }
    }

    // ===================================================================
    // Layout parsing
    // ===================================================================

    #[test]
    fn layout_without_kings_is_accepted() {
        let board = Board::from_layout("8/8/8/8/8/8/8/R7").unwrap();
        assert_eq!(board.king_square(Color::White), None);
        assert_eq!(board.piece_at(sq("a1")), white(PieceType::Rook));
    }

    #[test]
    fn layout_wrong_rank_count() {
        assert!(Board::from_layout("8/8/8").is_err());
    }

    #[test]
    fn layout_short_rank() {
        assert!(Board::from_layout("7/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn layout_long_rank() {
        assert!(Board::from_layout("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_layout("ppppppppp/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn layout_bad_character() {
        let err = Board::from_layout("x7/8/8/8/8/8/8/8").unwrap_err();
        assert!(err.to_string().contains("invalid character 'x'"));
    }

    #[test]
    fn layout_round_trip_custom() {
        let layout = "k3r3/8/8/8/8/8/4B3/4K3";
        assert_eq!(Board::from_layout(layout).unwrap().to_layout(), layout);
    }

    // ===================================================================
    // Mutation
    // ===================================================================

    #[test]
    fn is_within_bounds_edges() {
        assert!(Board::is_within_bounds(0, 0));
        assert!(Board::is_within_bounds(7, 7));
        assert!(!Board::is_within_bounds(-1, 0));
        assert!(!Board::is_within_bounds(0, 8));
        assert!(!Board::is_within_bounds(8, 3));
    }

    #[test]
    fn move_piece_to_empty_square() {
        let mut board = Board::standard();
        let captured = board.move_piece(sq("e2"), sq("e4"));
        assert_eq!(captured, None);
        assert_eq!(board.piece_at(sq("e2")), None);
        assert_eq!(board.piece_at(sq("e4")), white(PieceType::Pawn));
    }

    #[test]
    fn move_piece_overwrites_occupant() {
        let mut board = Board::standard();
        // No legality check: a rook may "jump" onto its own pawn.
        let captured = board.move_piece(sq("a1"), sq("a7"));
        assert_eq!(captured, black(PieceType::Pawn));
        assert_eq!(board.piece_at(sq("a7")), white(PieceType::Rook));
        assert_eq!(board.piece_at(sq("a1")), None);
        assert_eq!(board.pieces().count(), 31);
    }

    #[test]
    fn king_square_lookup() {
        let board = Board::standard();
        assert_eq!(board.king_square(Color::White), Some(sq("e1")));
        assert_eq!(board.king_square(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    // ===================================================================
    // Rendering
    // ===================================================================

    #[test]
    fn render_standard() {
        let text = Board::standard().render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 r n b q k b n r");
        assert_eq!(lines[4], "4 . . . . . . . .");
        assert_eq!(lines[7], "1 R N B Q K B N R");
        assert_eq!(lines[8], "  a b c d e f g h");
    }
}
