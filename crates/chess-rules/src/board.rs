//! The 8x8 board.

use crate::EngineError;
use chess_core::{Color, FenParser, Piece, PieceKind, Square};
use std::fmt;

/// An 8x8 grid of optional pieces.
///
/// The board is plain data: it knows nothing about whose turn it is or
/// which moves are legal. It is `Copy`, so speculative checks work on a
/// scratch copy and never touch the original.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Back rank layout from the a-file to the h-file.
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        for color in Color::BOTH {
            for (file, kind) in Self::BACK_RANK.into_iter().enumerate() {
                board.place(file as u8, color.back_rank(), Piece::new(kind, color));
                board.place(
                    file as u8,
                    color.pawn_rank(),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }
        board
    }

    fn place(&mut self, file: u8, rank: u8, piece: Piece) {
        if let Some(sq) = Square::new(file, rank) {
            self.set(sq, Some(piece));
        }
    }

    /// Builds a board from parsed FEN piece placement.
    pub fn from_fen(parsed: &FenParser) -> Self {
        let mut board = Board::empty();
        for &(sq, piece) in &parsed.pieces {
            board.set(sq, Some(piece));
        }
        board
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Puts a piece on (or with `None`, clears) the given square.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    /// Removes and returns the piece on the given square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Returns the color of the piece on the square, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|p| p.color)
    }

    /// Returns the square of the given color's king.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingKing`] if that color has no king.
    pub fn king_position(&self, color: Color) -> Result<Square, EngineError> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(sq, _)| sq)
            .ok_or(EngineError::MissingKing(color))
    }

    /// Iterates over every occupied square and its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares and pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |&(_, p)| p.color == color)
    }

    /// Checks that each color has exactly one king.
    pub fn validate_kings(&self) -> Result<(), EngineError> {
        for color in Color::BOTH {
            let kings = self
                .pieces_of(color)
                .filter(|&(_, p)| p.kind == PieceKind::King)
                .count();
            match kings {
                0 => return Err(EngineError::MissingKing(color)),
                1 => {}
                _ => return Err(EngineError::DuplicateKing(color)),
            }
        }
        Ok(())
    }

    /// Returns the FEN piece-placement field for this board.
    pub fn to_fen_placement(&self) -> String {
        let mut fen = String::new();
        for rank in 0..8u8 {
            let mut empty_count = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank < 7 {
                fen.push('/');
            }
        }
        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen_placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8u8 {
            write!(f, "{} ", 8 - rank)?;
            for file in 0..8u8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::to_fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
