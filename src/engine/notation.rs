//! Move notation parsing.
//!
//! Accepted forms:
//!
//! - short algebraic, `[RNBQK][file|rank][x]<square>` for pieces and
//!   `[<file>x]<square>` for pawns: `e4`, `exd5`, `Nf3`, `Nbd2`, `R1xa4`;
//! - coordinate, `<square>-<square>`: `e2-e4`.
//!
//! Parsing is a pure string transform; nothing here looks at a board.

use crate::engine::types::{
    MoveError, PieceType, Square, file_from_letter, file_letter, rank_digit, rank_from_digit,
};

/// File or rank given to pick one of several pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disambiguator {
    File(u8),
    Rank(u8),
}

impl Disambiguator {
    fn from_char(c: char) -> Option<Self> {
        file_from_letter(c)
            .map(Disambiguator::File)
            .or_else(|| rank_from_digit(c).map(Disambiguator::Rank))
    }

    /// Whether `sq` lies on this file or rank.
    pub fn matches(self, sq: Square) -> bool {
        match self {
            Disambiguator::File(file) => sq.file() == file,
            Disambiguator::Rank(rank) => sq.rank() == rank,
        }
    }
}

impl std::fmt::Display for Disambiguator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Disambiguator::File(file) => write!(f, "{}", file_letter(file)),
            Disambiguator::Rank(rank) => write!(f, "{}", rank_digit(rank)),
        }
    }
}

/// A decomposed short-algebraic move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedMove {
    pub piece: PieceType,
    pub destination: Square,
    /// For pieces, the file/rank between the letter and the destination.
    /// For pawn captures, the origin file before the `x`.
    pub identifier: Option<Disambiguator>,
}

impl ParsedMove {
    /// File named by the first character of a pawn move: the capture file
    /// for `exd5`, the destination file for `d5`.
    pub fn pawn_file(&self) -> u8 {
        match self.identifier {
            Some(Disambiguator::File(file)) => file,
            _ => self.destination.file(),
        }
    }
}

/// Result of parsing one line of move input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notation {
    Algebraic(ParsedMove),
    Coordinate { from: Square, to: Square },
}

/// Parse a move string. Piece letters, files and ranks are case-sensitive.
pub fn parse_move(text: &str) -> Result<Notation, MoveError> {
    let invalid = || MoveError::InvalidNotation(text.to_string());
    let chars: Vec<char> = text.chars().collect();

    // Coordinate form.
    if let [f1, r1, '-', f2, r2] = chars[..] {
        let from = square(f1, r1).ok_or_else(invalid)?;
        let to = square(f2, r2).ok_or_else(invalid)?;
        return Ok(Notation::Coordinate { from, to });
    }

    if chars.len() < 2 {
        return Err(invalid());
    }
    let (prefix, dest) = chars.split_at(chars.len() - 2);
    let destination = square(dest[0], dest[1]).ok_or_else(invalid)?;

    let (piece, identifier) = match prefix {
        [] => (PieceType::Pawn, None),
        [letter, rest @ ..] if letter.is_ascii_uppercase() => {
            let piece = PieceType::from_notation_letter(*letter).ok_or_else(invalid)?;
            let rest = rest.strip_suffix(&['x']).unwrap_or(rest);
            let identifier = match rest {
                [] => None,
                [c] => Some(Disambiguator::from_char(*c).ok_or_else(invalid)?),
                _ => return Err(invalid()),
            };
            (piece, identifier)
        }
        [file, 'x'] => {
            let file = file_from_letter(*file).ok_or_else(invalid)?;
            (PieceType::Pawn, Some(Disambiguator::File(file)))
        }
        _ => return Err(invalid()),
    };

    Ok(Notation::Algebraic(ParsedMove {
        piece,
        destination,
        identifier,
    }))
}

fn square(file: char, rank: char) -> Option<Square> {
    Some(Square::new(rank_from_digit(rank)?, file_from_letter(file)?))
}

// =========================================================================
// Tests
// =========================================================================
