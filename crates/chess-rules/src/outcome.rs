//! Checkmate and stalemate detection.

use crate::check::is_in_check;
use crate::movegen::has_legal_move;
use crate::{EngineError, GameState};
use chess_core::Color;
use std::fmt;

/// Terminal result for the color whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The color is in check and has no legal move.
    Checkmate(Color),
    /// The color is not in check and has no legal move.
    Stalemate(Color),
}

impl Outcome {
    /// Returns the winner, if any.
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate(loser) => Some(loser.opposite()),
            Outcome::Stalemate(_) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate(loser) => {
                write!(f, "checkmate, {} wins", loser.opposite())
            }
            Outcome::Stalemate(_) => write!(f, "stalemate, draw"),
        }
    }
}

/// Returns true if `color` is in check and has no legal move.
///
/// Check is computed from the board, not read from the cached flags.
pub fn is_checkmate(state: &GameState, color: Color) -> Result<bool, EngineError> {
    Ok(is_in_check(&state.board, color)?
        && !has_legal_move(&state.board, state.castling, color)?)
}

/// Returns true if `color` is not in check and has no legal move.
pub fn is_stalemate(state: &GameState, color: Color) -> Result<bool, EngineError> {
    Ok(!is_in_check(&state.board, color)?
        && !has_legal_move(&state.board, state.castling, color)?)
}

/// Evaluates the position for the given color.
///
/// The legal-move search runs once; check detection then decides between
/// the two outcomes, so they can never both hold.
pub fn evaluate(state: &GameState, color: Color) -> Result<Option<Outcome>, EngineError> {
    if has_legal_move(&state.board, state.castling, color)? {
        return Ok(None);
    }
    if is_in_check(&state.board, color)? {
        Ok(Some(Outcome::Checkmate(color)))
    } else {
        Ok(Some(Outcome::Stalemate(color)))
    }
}
