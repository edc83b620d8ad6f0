//! Game state: board, side to move, castling rights and check flags.

use crate::check::is_in_check;
use crate::movegen::{legal_targets, TargetList};
use crate::{Board, CastlingRights, EngineError};
use chess_core::{Color, FenParser, Square};

/// Per-color "king currently attacked" flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CheckFlags([bool; 2]);

impl CheckFlags {
    /// No king in check.
    pub const NONE: CheckFlags = CheckFlags([false; 2]);

    /// Computes the flags for both colors on the given board.
    pub fn compute(board: &Board) -> Result<Self, EngineError> {
        Ok(CheckFlags([
            is_in_check(board, Color::White)?,
            is_in_check(board, Color::Black)?,
        ]))
    }

    /// Returns true if the color's king is attacked.
    #[inline]
    pub const fn is_in_check(self, color: Color) -> bool {
        self.0[color.index()]
    }

    /// Returns the color in check, if any.
    pub fn checked(self) -> impl Iterator<Item = Color> {
        Color::BOTH.into_iter().filter(move |&c| self.is_in_check(c))
    }
}

/// Complete rules state of a game in progress.
///
/// Check flags are derived from the board; every mutation that goes through
/// the move applier recomputes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    /// Piece placement.
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// Which kings are attacked.
    pub check: CheckFlags,
}

impl GameState {
    /// Creates the standard starting state.
    pub fn startpos() -> Self {
        GameState {
            board: Board::startpos(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            check: CheckFlags::NONE,
        }
    }

    /// Creates a state from a FEN string.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPosition`] for malformed text, and
    /// [`EngineError::MissingKing`] or [`EngineError::DuplicateKing`] unless
    /// each color has exactly one king.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let parsed = FenParser::parse(fen)?;
        let board = Board::from_fen(&parsed);
        board.validate_kings()?;

        Ok(GameState {
            board,
            side_to_move: parsed.active_color,
            castling: CastlingRights::from_fen(&parsed.castling),
            check: CheckFlags::compute(&board)?,
        })
    }

    /// Converts the state to a FEN string. En passant is always "-" and the
    /// move counters are not tracked.
    pub fn to_fen(&self) -> String {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!(
            "{} {} {} - 0 1",
            self.board.to_fen_placement(),
            side,
            self.castling.to_fen()
        )
    }

    /// Recomputes the check flags from the board.
    pub fn refresh_check_flags(&mut self) -> Result<(), EngineError> {
        self.check = CheckFlags::compute(&self.board)?;
        Ok(())
    }

    /// Returns the legal destinations of the piece on `from`, whatever its
    /// color.
    pub fn legal_targets(&self, from: Square) -> Result<TargetList, EngineError> {
        legal_targets(&self.board, self.castling, from)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::startpos()
    }
}
