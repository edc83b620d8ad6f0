//! Turn control: selection, move commit, outcome signals and undo.
//!
//! [`Game`] owns the [`GameState`] and is the only entry point that mutates
//! it. A move goes through the same pipeline whichever way it arrives:
//!
//! 1. the origin must hold a piece of the side to move,
//! 2. the destination must be among that piece's legal targets,
//! 3. a promotion choice is obtained if the move needs one,
//! 4. the move is applied and the resulting outcome signals are reported.
//!
//! Illegal moves are [`MoveStatus::Rejected`] and leave the game untouched.

use crate::apply::{apply_move, needs_promotion};
use crate::movegen::{legal_moves, TargetList};
use crate::outcome::{evaluate, Outcome};
use crate::{Board, CastlingRights, CastlingSide, CheckFlags, EngineError, GameState};
use chess_core::{Color, Move, Piece, PieceKind, Promotion, Square};
use std::fmt;

/// Supplies the promotion piece when a pawn reaches its last rank.
///
/// The call is synchronous and happens before the move is committed.
pub trait PromotionHandler {
    /// Chooses what the `color` pawn arriving on `square` becomes.
    ///
    /// `None` means no choice could be made; the move is then not played.
    fn choose_promotion(&mut self, color: Color, square: Square) -> Option<Promotion>;
}

/// A fixed choice, used when no interaction is wanted.
impl PromotionHandler for Promotion {
    fn choose_promotion(&mut self, _color: Color, _square: Square) -> Option<Promotion> {
        Some(*self)
    }
}

/// A signal raised by an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// The color's king is attacked.
    InCheck(Color),
    /// The color is checkmated.
    Checkmate(Color),
    /// The color is stalemated.
    Stalemate(Color),
}

impl From<Outcome> for GameEvent {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Checkmate(color) => GameEvent::Checkmate(color),
            Outcome::Stalemate(color) => GameEvent::Stalemate(color),
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::InCheck(color) => write!(f, "{color} is in check"),
            GameEvent::Checkmate(color) => write!(f, "{color} is checkmated"),
            GameEvent::Stalemate(color) => write!(f, "{color} is stalemated"),
        }
    }
}

/// Details of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// The move as committed, including the promotion choice.
    pub mv: Move,
    /// The piece that moved, before promotion.
    pub piece: Piece,
    /// The piece captured on the destination square.
    pub captured: Option<Piece>,
    /// The castling side, if the king castled.
    pub castled: Option<CastlingSide>,
    /// Check, checkmate and stalemate signals after the move.
    pub events: Vec<GameEvent>,
}

impl MoveReport {
    /// Returns the checkmate or stalemate signal, if the move ended the game.
    pub fn outcome(&self) -> Option<Outcome> {
        self.events.iter().find_map(|event| match *event {
            GameEvent::Checkmate(color) => Some(Outcome::Checkmate(color)),
            GameEvent::Stalemate(color) => Some(Outcome::Stalemate(color)),
            GameEvent::InCheck(_) => None,
        })
    }
}

/// Result of submitting a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveStatus {
    /// The move was legal and has been committed.
    Accepted(MoveReport),
    /// The move was not legal; nothing changed.
    Rejected,
}

impl MoveStatus {
    /// Returns true if the move was committed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveStatus::Accepted(_))
    }

    /// Returns the report of an accepted move.
    pub fn report(&self) -> Option<&MoveReport> {
        match self {
            MoveStatus::Accepted(report) => Some(report),
            MoveStatus::Rejected => None,
        }
    }
}

/// A chess game between two local players.
///
/// Besides the rules state, the game holds a single undo slot. A snapshot
/// captures the board only; restoring it leaves the side to move and the
/// castling rights as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    state: GameState,
    snapshot: Option<Board>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game at the standard starting position.
    pub fn new() -> Self {
        Game {
            state: GameState::startpos(),
            snapshot: None,
        }
    }

    /// Creates a game from a FEN string.
    ///
    /// # Errors
    ///
    /// Fails if the text is malformed or either king is missing.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        Ok(Game {
            state: GameState::from_fen(fen)?,
            snapshot: None,
        })
    }

    /// Returns the full rules state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Returns the piece on a square.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.state.board.piece_at(sq)
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    /// Returns the check flags for both colors.
    pub fn check_flags(&self) -> CheckFlags {
        self.state.check
    }

    /// Returns the castling rights.
    pub fn castling_rights(&self) -> CastlingRights {
        self.state.castling
    }

    /// Returns the position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.state.to_fen()
    }

    /// Returns the legal destinations of the piece on `sq`.
    ///
    /// The list is empty when the square is empty or holds a piece of the
    /// side not to move.
    pub fn legal_targets(&self, sq: Square) -> Result<TargetList, EngineError> {
        match self.state.board.color_at(sq) {
            Some(color) if color == self.state.side_to_move => self.state.legal_targets(sq),
            _ => Ok(TargetList::new()),
        }
    }

    /// Returns every legal move of the side to move.
    pub fn legal_moves(&self) -> Result<Vec<Move>, EngineError> {
        legal_moves(&self.state.board, self.state.castling, self.state.side_to_move)
    }

    /// Returns the checkmate or stalemate of the side to move, if any.
    pub fn outcome(&self) -> Result<Option<Outcome>, EngineError> {
        evaluate(&self.state, self.state.side_to_move)
    }

    /// Submits a move, asking `handler` for the piece if a pawn promotes.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnresolvedPromotion`] if the handler makes no choice.
    ///   The game is left untouched.
    /// - [`EngineError::MissingKing`] if the position has lost a king.
    pub fn try_move<H>(
        &mut self,
        from: Square,
        to: Square,
        handler: &mut H,
    ) -> Result<MoveStatus, EngineError>
    where
        H: PromotionHandler + ?Sized,
    {
        self.play(from, to, |color, square| handler.choose_promotion(color, square))
    }

    /// Submits a move with the promotion choice given up front.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnresolvedPromotion`] if the move is legal and
    /// promotes but `promotion` is `None`. The game is left untouched.
    pub fn commit(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Promotion>,
    ) -> Result<MoveStatus, EngineError> {
        self.play(from, to, |_, _| promotion)
    }

    /// Submits a parsed coordinate move.
    pub fn commit_move(&mut self, mv: Move) -> Result<MoveStatus, EngineError> {
        self.commit(mv.from, mv.to, mv.promotion)
    }

    fn play<F>(&mut self, from: Square, to: Square, choose: F) -> Result<MoveStatus, EngineError>
    where
        F: FnOnce(Color, Square) -> Option<Promotion>,
    {
        let mover = self.state.side_to_move;
        if self.state.board.color_at(from) != Some(mover) {
            tracing::trace!(%from, %to, side = %mover, "rejected: no piece of the side to move");
            return Ok(MoveStatus::Rejected);
        }
        if !self.state.legal_targets(from)?.contains(to) {
            tracing::trace!(%from, %to, "rejected: illegal destination");
            return Ok(MoveStatus::Rejected);
        }

        let promotion = if needs_promotion(&self.state, from, to) {
            choose(mover, to)
        } else {
            None
        };
        let applied = apply_move(&mut self.state, from, to, promotion)?;

        let mut events: Vec<GameEvent> =
            self.state.check.checked().map(GameEvent::InCheck).collect();
        if let Some(outcome) = evaluate(&self.state, self.state.side_to_move)? {
            tracing::info!(%outcome, "game over");
            events.push(outcome.into());
        }
        for event in &events {
            tracing::info!(%event, "move signal");
        }

        Ok(MoveStatus::Accepted(MoveReport {
            mv: applied.mv,
            piece: applied.piece,
            captured: applied.captured,
            castled: applied.castled,
            events,
        }))
    }

    /// Saves the current board in the undo slot, replacing any earlier
    /// snapshot.
    pub fn snapshot(&mut self) {
        self.snapshot = Some(self.state.board);
    }

    /// Returns true if the undo slot is filled.
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Puts the saved board back and empties the undo slot.
    ///
    /// Returns `Ok(false)` without changing anything when there is no
    /// snapshot. Check flags are recomputed for the restored board.
    pub fn restore(&mut self) -> Result<bool, EngineError> {
        let Some(board) = self.snapshot.take() else {
            return Ok(false);
        };
        self.state.board = board;
        self.state.refresh_check_flags()?;
        tracing::debug!(side = %self.state.side_to_move, "board restored from snapshot");
        Ok(true)
    }

    /// Removes the piece on `sq`, taking a snapshot first.
    ///
    /// Returns the removed piece, or `None` for an empty square, in which
    /// case the undo slot is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::KingRemoval`] for a king. The game is not
    /// changed.
    pub fn clear_square(&mut self, sq: Square) -> Result<Option<Piece>, EngineError> {
        let Some(piece) = self.state.board.piece_at(sq) else {
            return Ok(None);
        };
        if piece.kind == PieceKind::King {
            return Err(EngineError::KingRemoval {
                color: piece.color,
                square: sq,
            });
        }

        self.snapshot();
        self.state.board.set(sq, None);
        self.state.refresh_check_flags()?;
        tracing::debug!(square = %sq, %piece, "square cleared");
        Ok(Some(piece))
    }
}
