//! Check detection and the self-check legality test.

use crate::movegen::raw_targets;
use crate::{Board, EngineError};
use chess_core::{Color, PieceKind, Square};

/// Returns true if the king of the given color is attacked.
///
/// Every opposing piece's raw targets are generated and searched for the
/// king's square.
///
/// # Errors
///
/// Returns [`EngineError::MissingKing`] if the color has no king.
pub fn is_in_check(board: &Board, color: Color) -> Result<bool, EngineError> {
    let king_sq = board.king_position(color)?;
    Ok(is_square_attacked(board, king_sq, color.opposite()))
}

/// Returns true if any piece of `by_color` attacks `sq`.
///
/// Pawns attack both forward diagonals whether or not anything stands
/// there, and never attack by pushing. Every other piece attacks the
/// squares of its movement pattern. A square held by `by_color` itself is
/// never reported.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    if board.color_at(sq) == Some(by_color) {
        return false;
    }
    board.pieces_of(by_color).any(|(from, piece)| match piece.kind {
        PieceKind::Pawn => pawn_attacks(from, by_color, sq),
        _ => raw_targets(board, from, piece).contains(sq),
    })
}

fn pawn_attacks(from: Square, color: Color, sq: Square) -> bool {
    let dir = color.pawn_direction();
    [1, -1]
        .into_iter()
        .any(|file_step| from.offset(file_step, dir) == Some(sq))
}

/// Returns true if moving the piece on `from` to `to` would leave its own
/// king in check.
///
/// The move is tried on a scratch copy of the board: the occupant of `to`
/// is overwritten and `from` is vacated. The board passed in is never
/// modified. An empty `from` moves nothing and so causes no check.
pub fn would_cause_self_check(
    board: &Board,
    from: Square,
    to: Square,
) -> Result<bool, EngineError> {
    let Some(piece) = board.piece_at(from) else {
        return Ok(false);
    };
    let mut scratch = *board;
    let moved = scratch.take(from);
    scratch.set(to, moved);
    is_in_check(&scratch, piece.color)
}
