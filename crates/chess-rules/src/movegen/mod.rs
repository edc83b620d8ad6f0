//! Move generation.
//!
//! Targets are generated per piece by walking its step and ray tables over
//! the mailbox board. Castling is added for kings when the caller asks for
//! legal targets, and every candidate is then run through the self-check
//! filter in [`crate::check`].

mod attacks;
#[cfg(test)]
mod perft;

use crate::check::{is_in_check, would_cause_self_check};
use crate::{Board, CastlingRights, CastlingSide, EngineError};
use chess_core::{Color, Move, Piece, PieceKind, Square};

pub use attacks::{
    raw_targets, DIAGONAL_DIRECTIONS, KING_STEPS, KNIGHT_STEPS, STRAIGHT_DIRECTIONS,
};

/// A list of destination squares with a fixed maximum capacity.
///
/// A single piece reaches at most 27 squares (a centralised queen), so a
/// fixed-size array avoids heap allocations during generation.
#[derive(Clone, Copy)]
pub struct TargetList {
    squares: [Square; Self::MAX_TARGETS],
    len: usize,
}

impl TargetList {
    /// Maximum number of targets for a single piece, with headroom.
    pub const MAX_TARGETS: usize = 32;

    /// Creates an empty target list.
    #[inline]
    pub const fn new() -> Self {
        TargetList {
            squares: [Square::A8; Self::MAX_TARGETS],
            len: 0,
        }
    }

    /// Adds a square to the list.
    #[inline]
    pub fn push(&mut self, sq: Square) {
        debug_assert!(self.len < Self::MAX_TARGETS);
        self.squares[self.len] = sq;
        self.len += 1;
    }

    /// Returns the number of targets.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the targets.
    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    /// Returns true if the square is one of the targets.
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.as_slice().contains(&sq)
    }

    /// Iterates over the targets.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Square> {
        self.as_slice().iter()
    }

    /// Retains only targets for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Square) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.squares[read]) {
                self.squares[write] = self.squares[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for TargetList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TargetList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for TargetList {}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for TargetList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the destination squares of the piece on `from`.
///
/// With `apply_check_filter` false this is the raw movement pattern, used
/// for attack detection. With it true, kings also get castling targets and
/// every candidate that would leave the mover's own king attacked is dropped.
/// An empty square has no targets.
///
/// # Errors
///
/// Returns [`EngineError::MissingKing`] if filtering needs a king that is
/// not on the board.
pub fn pseudo_legal_targets(
    board: &Board,
    castling: CastlingRights,
    from: Square,
    apply_check_filter: bool,
) -> Result<TargetList, EngineError> {
    let Some(piece) = board.piece_at(from) else {
        return Ok(TargetList::new());
    };

    let mut candidates = raw_targets(board, from, piece);
    if !apply_check_filter {
        return Ok(candidates);
    }

    if piece.kind == PieceKind::King {
        castling_targets(board, castling, from, piece, &mut candidates)?;
    }

    let mut legal = TargetList::new();
    for &to in &candidates {
        if !would_cause_self_check(board, from, to)? {
            legal.push(to);
        }
    }
    Ok(legal)
}

/// Generates the legal destination squares of the piece on `from`.
pub fn legal_targets(
    board: &Board,
    castling: CastlingRights,
    from: Square,
) -> Result<TargetList, EngineError> {
    pseudo_legal_targets(board, castling, from, true)
}

/// Adds the castling destinations for a king standing on `from`.
///
/// A side qualifies when its right is still held, the king and the rook are
/// on their home squares, every square strictly between them is empty, and
/// the king is not currently in check. The squares the king passes over are
/// not tested for attack.
fn castling_targets(
    board: &Board,
    castling: CastlingRights,
    from: Square,
    king: Piece,
    targets: &mut TargetList,
) -> Result<(), EngineError> {
    let color = king.color;
    let home = Square::new(4, color.back_rank());
    if home != Some(from) {
        return Ok(());
    }
    if !CastlingSide::BOTH
        .into_iter()
        .any(|side| castling.allows(color, side))
    {
        return Ok(());
    }
    if is_in_check(board, color)? {
        return Ok(());
    }

    let rook = Piece::new(PieceKind::Rook, color);
    for side in CastlingSide::BOTH {
        if !castling.allows(color, side) || board.piece_at(side.rook_home(color)) != Some(rook) {
            continue;
        }
        let (lo, hi) = match side {
            CastlingSide::Kingside => (from.file() + 1, side.rook_file()),
            CastlingSide::Queenside => (side.rook_file() + 1, from.file()),
        };
        let path_clear = (lo..hi)
            .filter_map(|file| Square::new(file, from.rank()))
            .all(|sq| board.is_empty(sq));
        if path_clear {
            if let Some(to) = from.offset(2 * side.direction(), 0) {
                targets.push(to);
            }
        }
    }
    Ok(())
}

/// Generates every legal move for the given color.
///
/// Promotions are listed once per destination, without a promotion choice.
pub fn legal_moves(
    board: &Board,
    castling: CastlingRights,
    color: Color,
) -> Result<Vec<Move>, EngineError> {
    let mut moves = Vec::new();
    for (from, _) in board.pieces_of(color) {
        for &to in &legal_targets(board, castling, from)? {
            moves.push(Move::new(from, to));
        }
    }
    Ok(moves)
}

/// Returns true if the color has at least one legal move.
pub fn has_legal_move(
    board: &Board,
    castling: CastlingRights,
    color: Color,
) -> Result<bool, EngineError> {
    for (from, _) in board.pieces_of(color) {
        if !legal_targets(board, castling, from)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}
