//! Error type for the rules engine.

use chess_core::{Color, FenError, Square};
use thiserror::Error;

/// Errors raised by the rules engine.
///
/// Illegal moves are not errors: they come back as
/// [`MoveStatus::Rejected`](crate::MoveStatus::Rejected) and leave the game
/// untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A color's king is not on the board. The position is corrupt and the
    /// game cannot continue.
    #[error("no {0} king on the board")]
    MissingKing(Color),

    /// A position holds two or more kings of one color.
    #[error("more than one {0} king on the board")]
    DuplicateKing(Color),

    /// A move was applied from an empty square.
    #[error("no piece on {0}")]
    NoPieceAt(Square),

    /// A pawn move reaches the last rank but no promotion piece was chosen.
    #[error("move {from}{to} promotes a pawn but no promotion piece was chosen")]
    UnresolvedPromotion { from: Square, to: Square },

    /// Board editing tried to remove a king.
    #[error("cannot remove the {color} king from {square}")]
    KingRemoval { color: Color, square: Square },

    /// The position text could not be parsed.
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] FenError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EngineError::MissingKing(Color::Black);
        assert_eq!(err.to_string(), "no Black king on the board");

        let err = EngineError::UnresolvedPromotion {
            from: Square::from_algebraic("e7").unwrap(),
            to: Square::E8,
        };
        assert!(err.to_string().contains("e7e8"));

        let err = EngineError::KingRemoval {
            color: Color::White,
            square: Square::E1,
        };
        assert_eq!(err.to_string(), "cannot remove the White king from e1");
    }

    #[test]
    fn fen_errors_convert() {
        let err: EngineError = FenError::InvalidPartCount(1).into();
        assert!(matches!(err, EngineError::InvalidPosition(_)));
        assert_eq!(err.clone(), err);
    }
}
