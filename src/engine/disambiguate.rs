//! Narrowing a set of candidate origins down to the one piece a move means.

use crate::engine::notation::{Disambiguator, ParsedMove};
use crate::engine::types::{Ambiguity, Color, MoveError, PieceType, Square, SquareSet};

/// Pick the single origin for `parsed` among `candidates`.
///
/// `candidates` must already be restricted to squares holding a `mover`
/// piece of the parsed type whose pseudo-legal moves reach the destination.
///
/// - no candidate: `NoLegalOrigin`;
/// - one candidate: that square, whatever identifier was written;
/// - several pawns: keep the one on the file the notation starts with;
/// - several pieces: an identifier is required, and must leave one square.
pub fn resolve_origin(
    parsed: &ParsedMove,
    candidates: SquareSet,
    mover: Color,
) -> Result<Square, MoveError> {
    let mut iter = candidates.iter();
    let (Some(first), second) = (iter.next(), iter.next()) else {
        return Err(MoveError::NoLegalOrigin {
            piece: Some(parsed.piece),
            color: mover,
            destination: parsed.destination,
        });
    };
    if second.is_none() {
        return Ok(first);
    }

    let filter = if parsed.piece == PieceType::Pawn {
        Disambiguator::File(parsed.pawn_file())
    } else {
        parsed.identifier.ok_or(MoveError::AmbiguousOrigin {
            destination: parsed.destination,
            reason: Ambiguity::IdentifierRequired,
        })?
    };

    let mut remaining = candidates.iter().filter(|&sq| filter.matches(sq));
    match (remaining.next(), remaining.next()) {
        (Some(origin), None) => Ok(origin),
        _ => Err(MoveError::AmbiguousOrigin {
            destination: parsed.destination,
            reason: Ambiguity::StillAmbiguous,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn squares(names: &[&str]) -> SquareSet {
        names.iter().map(|n| sq(n)).collect()
    }

    fn parsed(piece: PieceType, dest: &str, identifier: Option<Disambiguator>) -> ParsedMove {
        ParsedMove {
            piece,
            destination: sq(dest),
            identifier,
        }
    }

    #[test]
    fn no_candidates() {
        let m = parsed(PieceType::Knight, "e5", None);
        assert_eq!(
            resolve_origin(&m, SquareSet::EMPTY, Color::White),
            Err(MoveError::NoLegalOrigin {
                piece: Some(PieceType::Knight),
                color: Color::White,
                destination: sq("e5"),
            })
        );
    }

    #[test]
    fn single_candidate_needs_no_identifier() {
        let m = parsed(PieceType::Knight, "f3", None);
        assert_eq!(resolve_origin(&m, squares(&["g1"]), Color::White), Ok(sq("g1")));
    }

    #[test]
    fn single_candidate_ignores_identifier() {
        let m = parsed(PieceType::Rook, "d1", Some(Disambiguator::File(7)));
        assert_eq!(resolve_origin(&m, squares(&["a1"]), Color::White), Ok(sq("a1")));
    }

    #[test]
    fn several_pieces_without_identifier() {
        let m = parsed(PieceType::Rook, "d1", None);
        assert_eq!(
            resolve_origin(&m, squares(&["a1", "h1"]), Color::White),
            Err(MoveError::AmbiguousOrigin {
                destination: sq("d1"),
                reason: Ambiguity::IdentifierRequired,
            })
        );
    }

    #[test]
    fn file_identifier_selects_piece() {
        let m = parsed(PieceType::Rook, "d1", Some(Disambiguator::File(0)));
        assert_eq!(
            resolve_origin(&m, squares(&["a1", "h1"]), Color::White),
            Ok(sq("a1"))
        );
    }

    #[test]
    fn rank_identifier_selects_piece() {
        let m = parsed(PieceType::Rook, "a4", Some(Disambiguator::Rank(sq("a8").rank())));
        assert_eq!(
            resolve_origin(&m, squares(&["a1", "a8"]), Color::White),
            Ok(sq("a8"))
        );
    }

    #[test]
    fn identifier_matching_both_is_still_ambiguous() {
        let m = parsed(PieceType::Knight, "d2", Some(Disambiguator::Rank(sq("b1").rank())));
        assert_eq!(
            resolve_origin(&m, squares(&["b1", "f1"]), Color::White),
            Err(MoveError::AmbiguousOrigin {
                destination: sq("d2"),
                reason: Ambiguity::StillAmbiguous,
            })
        );
    }

    #[test]
    fn identifier_matching_none_is_still_ambiguous() {
        let m = parsed(PieceType::Knight, "d2", Some(Disambiguator::File(2)));
        assert!(matches!(
            resolve_origin(&m, squares(&["b1", "f1"]), Color::White),
            Err(MoveError::AmbiguousOrigin {
                reason: Ambiguity::StillAmbiguous,
                ..
            })
        ));
    }

    #[test]
    fn pawns_filtered_by_leading_file() {
        let capture = parsed(PieceType::Pawn, "d5", Some(Disambiguator::File(4)));
        assert_eq!(
            resolve_origin(&capture, squares(&["c4", "e4"]), Color::White),
            Ok(sq("e4"))
        );
        // "d5" with both c4 and e4 able to capture: no pawn on the d-file.
        let push = parsed(PieceType::Pawn, "d5", None);
        assert!(resolve_origin(&push, squares(&["c4", "e4"]), Color::White).is_err());
    }
}
