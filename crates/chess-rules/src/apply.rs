//! Committing moves to the game state.

use crate::{CastlingSide, CheckFlags, EngineError, GameState};
use chess_core::{Move, Piece, PieceKind, Promotion, Square};

/// What a committed move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The move as committed, including any promotion choice.
    pub mv: Move,
    /// The piece that moved, before promotion.
    pub piece: Piece,
    /// The piece that stood on the destination square.
    pub captured: Option<Piece>,
    /// The castling side, if this was a castling move.
    pub castled: Option<CastlingSide>,
}

/// Returns true if moving the piece on `from` to `to` is a pawn reaching its
/// last rank.
pub fn needs_promotion(state: &GameState, from: Square, to: Square) -> bool {
    matches!(
        state.board.piece_at(from),
        Some(Piece { kind: PieceKind::Pawn, color }) if to.rank() == color.promotion_rank()
    )
}

/// Applies an already-legal move to the state.
///
/// Castling rights are cleared for a king move, for a rook leaving its
/// corner and for a rook captured on its corner. A king moving two files
/// brings its rook across to the square next to it. A pawn reaching the last
/// rank becomes the chosen piece. Check flags are recomputed for both colors
/// and the side to move flips.
///
/// The move is built on a copy of the state, which replaces the original
/// only once every step has succeeded.
///
/// # Errors
///
/// - [`EngineError::NoPieceAt`] if `from` is empty.
/// - [`EngineError::UnresolvedPromotion`] if the move promotes and
///   `promotion` is `None`.
/// - [`EngineError::MissingKing`] if a king is missing afterwards.
pub fn apply_move(
    state: &mut GameState,
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
) -> Result<AppliedMove, EngineError> {
    let piece = state
        .board
        .piece_at(from)
        .ok_or(EngineError::NoPieceAt(from))?;
    let color = piece.color;

    let promotion = if needs_promotion(state, from, to) {
        Some(promotion.ok_or(EngineError::UnresolvedPromotion { from, to })?)
    } else {
        None
    };

    let mut next = *state;

    if piece.kind == PieceKind::Rook {
        if let Some((owner, side)) = CastlingSide::from_rook_home(from) {
            if owner == color {
                next.castling.remove(color, side);
            }
        }
    }

    let mut castled = None;
    if piece.kind == PieceKind::King {
        next.castling.remove_color(color);
        castled = CastlingSide::from_king_step(to.file() as i8 - from.file() as i8);
        if let Some(side) = castled {
            let rook_from = side.rook_home(color);
            if let Some(rook_to) = to.offset(-side.direction(), 0) {
                let rook = next.board.take(rook_from);
                next.board.set(rook_to, rook);
                tracing::debug!(%color, ?side, %rook_from, %rook_to, "castling rook relocated");
            }
        }
    }

    let captured = next.board.piece_at(to);
    if let Some(victim) = captured {
        if victim.kind == PieceKind::Rook {
            if let Some((owner, side)) = CastlingSide::from_rook_home(to) {
                if owner == victim.color {
                    next.castling.remove(owner, side);
                }
            }
        }
    }

    let placed = match promotion {
        Some(choice) => {
            tracing::debug!(%color, square = %to, piece = %choice.kind(), "pawn promoted");
            Piece::new(choice.kind(), color)
        }
        None => piece,
    };
    next.board.set(from, None);
    next.board.set(to, Some(placed));

    next.check = CheckFlags::compute(&next.board)?;
    next.side_to_move = state.side_to_move.opposite();
    *state = next;

    let mv = Move {
        from,
        to,
        promotion,
    };
    tracing::debug!(%mv, piece = %piece, captured = ?captured, "move applied");

    Ok(AppliedMove {
        mv,
        piece,
        captured,
        castled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CastlingRights;
    use chess_core::Color;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn simple_move_flips_side() {
        let mut state = GameState::startpos();
        let applied = apply_move(&mut state, sq("g1"), sq("f3"), None).unwrap();
        assert_eq!(applied.piece, Piece::new(PieceKind::Knight, Color::White));
        assert_eq!(applied.captured, None);
        assert_eq!(state.side_to_move, Color::Black);
        assert!(state.board.is_empty(sq("g1")));
        assert_eq!(
            state.board.piece_at(sq("f3")),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );
    }

    #[test]
    fn capture_overwrites_target() {
        let mut state =
            GameState::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let applied = apply_move(&mut state, sq("e4"), sq("d5"), None).unwrap();
        assert_eq!(
            applied.captured,
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(state.board.pieces().count(), 3);
    }

    #[test]
    fn kingside_castle_moves_rook() {
        let mut state = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let applied = apply_move(&mut state, Square::E1, Square::G1, None).unwrap();
        assert_eq!(applied.castled, Some(CastlingSide::Kingside));
        assert_eq!(
            state.board.piece_at(Square::F1),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert!(state.board.is_empty(Square::H1));
        assert!(state.board.is_empty(Square::E1));
        assert_eq!(state.castling, CastlingRights::NONE);
    }

    #[test]
    fn queenside_castle_moves_rook() {
        let mut state = GameState::from_fen("r3k3/8/8/8/8/8/8/4K3 b q - 0 1").unwrap();
        let applied = apply_move(&mut state, Square::E8, Square::C8, None).unwrap();
        assert_eq!(applied.castled, Some(CastlingSide::Queenside));
        assert_eq!(
            state.board.piece_at(Square::D8),
            Some(Piece::new(PieceKind::Rook, Color::Black))
        );
        assert!(state.board.is_empty(Square::A8));
    }

    #[test]
    fn king_step_clears_both_rights() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        apply_move(&mut state, Square::E1, Square::F1, None).unwrap();
        assert!(!state.castling.can_castle_kingside(Color::White));
        assert!(!state.castling.can_castle_queenside(Color::White));
        assert!(state.castling.can_castle_kingside(Color::Black));
        assert!(state.castling.can_castle_queenside(Color::Black));
    }

    #[test]
    fn rook_move_clears_one_side() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        apply_move(&mut state, Square::A1, sq("a4"), None).unwrap();
        assert!(state.castling.can_castle_kingside(Color::White));
        assert!(!state.castling.can_castle_queenside(Color::White));
    }

    #[test]
    fn rook_capture_clears_victim_side() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        apply_move(&mut state, Square::H1, Square::H8, None).unwrap();
        assert!(!state.castling.can_castle_kingside(Color::White));
        assert!(!state.castling.can_castle_kingside(Color::Black));
        assert!(state.castling.can_castle_queenside(Color::Black));
        assert!(state.check.is_in_check(Color::Black));
    }

    #[test]
    fn promotion_requires_a_choice() {
        let mut state = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = state;
        assert!(needs_promotion(&state, sq("a7"), Square::A8));
        assert_eq!(
            apply_move(&mut state, sq("a7"), Square::A8, None),
            Err(EngineError::UnresolvedPromotion {
                from: sq("a7"),
                to: Square::A8
            })
        );
        assert_eq!(state, before);

        let applied =
            apply_move(&mut state, sq("a7"), Square::A8, Some(Promotion::Knight)).unwrap();
        assert_eq!(applied.mv.promotion, Some(Promotion::Knight));
        assert_eq!(
            state.board.piece_at(Square::A8),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );
    }

    #[test]
    fn promotion_choice_ignored_for_ordinary_moves() {
        let mut state = GameState::startpos();
        let applied = apply_move(&mut state, sq("e2"), sq("e4"), Some(Promotion::Queen)).unwrap();
        assert_eq!(applied.mv.promotion, None);
        assert_eq!(
            state.board.piece_at(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn black_promotes_on_first_rank() {
        let mut state = GameState::from_fen("4k3/8/8/8/8/8/6p1/K7 b - - 0 1").unwrap();
        assert!(needs_promotion(&state, sq("g2"), sq("g1")));
        apply_move(&mut state, sq("g2"), sq("g1"), Some(Promotion::Queen)).unwrap();
        assert_eq!(
            state.board.piece_at(sq("g1")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert!(state.check.is_in_check(Color::White));
    }

    #[test]
    fn empty_origin_is_an_error() {
        let mut state = GameState::startpos();
        assert_eq!(
            apply_move(&mut state, sq("e4"), sq("e5"), None),
            Err(EngineError::NoPieceAt(sq("e4")))
        );
    }
}
