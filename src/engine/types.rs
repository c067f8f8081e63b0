use std::fmt;

use crate::engine::board::Board;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Internal rank delta of a forward pawn step. White advances towards
    /// rank 8, which is internal rank 0.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Internal rank on which this side's pawns start (rank 2 / rank 7).
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceType
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// All piece types in order.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Single uppercase letter for white, lowercase for black.
    pub fn to_char(self, color: Color) -> char {
        let c = match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a move-notation piece letter (`R N B Q K`, case-sensitive).
    /// Pawns have no letter in move notation.
    pub fn from_notation_letter(c: char) -> Option<PieceType> {
        match c {
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "pawn"),
            PieceType::Knight => write!(f, "knight"),
            PieceType::Bishop => write!(f, "bishop"),
            PieceType::Rook => write!(f, "rook"),
            PieceType::Queen => write!(f, "queen"),
            PieceType::King => write!(f, "king"),
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece on the board: an explicit colour tag plus its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceType) -> Self {
        Piece { color, kind }
    }

    /// Layout character: uppercase for white, lowercase for black.
    pub fn to_char(self) -> char {
        self.kind.to_char(self.color)
    }

    /// Parse a layout character (`PNBRQK` white, `pnbrqk` black).
    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece { color, kind })
    }

    #[inline]
    pub fn color_of(self) -> Color {
        self.color
    }

    /// True when this piece belongs to the side opposing `color`.
    #[inline]
    pub fn is_enemy(self, color: Color) -> bool {
        self.color != color
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A square on the board, stored as `rank * 8 + file`.
///
/// Internal rank 0 is the top row as printed (rank 8); internal rank 7 is
/// rank 1. Files run a..h as 0..7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const NUM: usize = 64;

    #[inline]
    pub fn new(rank: u8, file: u8) -> Self {
        debug_assert!(rank < 8 && file < 8, "square out of range: ({rank}, {file})");
        Square(rank * 8 + file)
    }

    /// Internal rank (0 = rank 8).
    #[inline]
    pub fn rank(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.0 & 7
    }

    /// The square `(dr, df)` away, if it is still on the board.
    #[inline]
    pub fn offset(self, dr: i8, df: i8) -> Option<Square> {
        let rank = self.rank() as i8 + dr;
        let file = self.file() as i8 + df;
        Board::is_within_bounds(rank, file).then(|| Square::new(rank as u8, file as u8))
    }

    /// Iterate over all 64 squares, rank 8 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = file_from_letter(bytes[0] as char)?;
        let rank = rank_from_digit(bytes[1] as char)?;
        Some(Square::new(rank, file))
    }

    /// Convert to algebraic notation like "e4".
    pub fn to_algebraic(self) -> String {
        format!("{}{}", file_letter(self.file()), rank_digit(self.rank()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// `a`..`h` to file 0..7.
#[inline]
pub fn file_from_letter(c: char) -> Option<u8> {
    ('a'..='h').contains(&c).then(|| c as u8 - b'a')
}

/// `1`..`8` to internal rank 7..0.
#[inline]
pub fn rank_from_digit(c: char) -> Option<u8> {
    ('1'..='8').contains(&c).then(|| b'8' - c as u8)
}

#[inline]
pub fn file_letter(file: u8) -> char {
    (b'a' + file) as char
}

#[inline]
pub fn rank_digit(rank: u8) -> char {
    (b'8' - rank) as char
}

// ---------------------------------------------------------------------------
// SquareSet
// ---------------------------------------------------------------------------

/// A set of squares, one bit per square index.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.0;
    }

    #[inline]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.0) != 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate in index order (a8, b8, .. h1).
    #[inline]
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

/// Iterator over the members of a `SquareSet`.
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let sq = Square(self.0.trailing_zeros() as u8);
            self.0 &= self.0 - 1; // clear LSB
            Some(sq)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for SquareSetIter {}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SquareSet(0x{:016x})", self.0)?;
        for rank in 0..8 {
            write!(f, "  {} ", rank_digit(rank))?;
            for file in 0..8 {
                let sq = Square::new(rank, file);
                write!(f, "{}", if self.contains(sq) { '1' } else { '.' })?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why disambiguation could not settle on a single origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ambiguity {
    /// Several pieces reach the square and no file/rank was given.
    IdentifierRequired,
    /// A file/rank was given but it does not single out one piece.
    StillAmbiguous,
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ambiguity::IdentifierRequired => write!(f, "identify the piece"),
            Ambiguity::StillAmbiguous => write!(f, "unambiguous identifier required"),
        }
    }
}

/// Reasons a submitted move is rejected. The board and turn are never
/// modified when one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid notation: '{0}'")]
    InvalidNotation(String),

    #[error(
        "no {color} {} can move to {destination}",
        .piece.map_or_else(|| "piece".to_string(), |p| p.to_string())
    )]
    NoLegalOrigin {
        /// `None` when a coordinate move names an empty square.
        piece: Option<PieceType>,
        color: Color,
        destination: Square,
    },

    #[error("more than one piece can move to {destination}: {reason}")]
    AmbiguousOrigin {
        destination: Square,
        reason: Ambiguity,
    },

    #[error("{from} -> {to} would leave the king in check")]
    SelfCheck { from: Square, to: Square },

    #[error("no {0} king on the board")]
    MissingKing(Color),
}

/// Errors building a board or game from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),
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

    #[test]
    fn color_toggle() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn color_display() {
        assert_eq!(Color::White.to_string(), "white");
        assert_eq!(Color::Black.to_string(), "black");
    }

    #[test]
    fn pawn_geometry_per_color() {
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.forward(), 1);
        assert_eq!(Color::White.pawn_start_rank(), sq("e2").rank());
        assert_eq!(Color::Black.pawn_start_rank(), sq("e7").rank());
    }

    #[test]
    fn piece_char_round_trip() {
        for kind in PieceType::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_char(piece.to_char()), Some(piece));
            }
        }
    }

    #[test]
    fn piece_from_char_invalid() {
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::from_char('1'), None);
    }

    #[test]
    fn notation_letters_are_case_sensitive() {
        assert_eq!(PieceType::from_notation_letter('N'), Some(PieceType::Knight));
        assert_eq!(PieceType::from_notation_letter('K'), Some(PieceType::King));
        assert_eq!(PieceType::from_notation_letter('n'), None);
        assert_eq!(PieceType::from_notation_letter('P'), None);
    }

    #[test]
    fn enemy_is_derived_from_color_tag() {
        let black_rook = Piece::new(Color::Black, PieceType::Rook);
        assert_eq!(black_rook.color_of(), Color::Black);
        assert!(black_rook.is_enemy(Color::White));
        assert!(!black_rook.is_enemy(Color::Black));
    }

    #[test]
    fn square_internal_coordinates() {
        // Rank 8 is internal row 0.
        assert_eq!(sq("a8"), Square::new(0, 0));
        assert_eq!(sq("h8"), Square::new(0, 7));
        assert_eq!(sq("a1"), Square::new(7, 0));
        assert_eq!(sq("h1"), Square::new(7, 7));
        let e4 = sq("e4");
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 4);
    }

    #[test]
    fn square_algebraic_round_trip() {
        for file in 'a'..='h' {
            for digit in '1'..='8' {
                let name = format!("{file}{digit}");
                assert_eq!(sq(&name).to_algebraic(), name);
            }
        }
        for s in Square::all() {
            assert_eq!(Square::from_algebraic(&s.to_algebraic()), Some(s));
        }
    }

    #[test]
    fn square_from_algebraic_invalid() {
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("a"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("E4"), None);
        assert_eq!(Square::from_algebraic("abc"), None);
    }

    #[test]
    fn square_offset_stays_on_board() {
        assert_eq!(sq("e4").offset(-1, 0), Some(sq("e5")));
        assert_eq!(sq("e4").offset(1, 1), Some(sq("f3")));
        assert_eq!(sq("a1").offset(0, -1), None);
        assert_eq!(sq("h8").offset(-1, 0), None);
    }

    #[test]
    fn square_set_basic_ops() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(sq("e4"));
        set.insert(sq("e4"));
        set.insert(sq("a8"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(sq("e4")));
        assert!(!set.contains(sq("e5")));
        let members: Vec<Square> = set.iter().collect();
        assert_eq!(members, vec![sq("a8"), sq("e4")]);
        assert_eq!(set.iter().len(), 2);
    }

    #[test]
    fn square_set_from_iterator() {
        let set: SquareSet = [sq("c3"), sq("d4"), sq("c3")].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn move_error_messages() {
        let err = MoveError::AmbiguousOrigin {
            destination: sq("d1"),
            reason: Ambiguity::IdentifierRequired,
        };
        assert_eq!(
            err.to_string(),
            "more than one piece can move to d1: identify the piece"
        );
        let err = MoveError::NoLegalOrigin {
            piece: Some(PieceType::Knight),
            color: Color::White,
            destination: sq("e5"),
        };
        assert_eq!(err.to_string(), "no white knight can move to e5");
        let err = MoveError::NoLegalOrigin {
            piece: None,
            color: Color::White,
            destination: sq("e5"),
        };
        assert_eq!(err.to_string(), "no white piece can move to e5");
        assert_eq!(
            MoveError::MissingKing(Color::Black).to_string(),
            "no black king on the board"
        );
    }
}
