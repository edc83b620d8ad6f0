//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the rules engine and
//! its front ends:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Promotion`] for the pieces a pawn may become
//! - [`Square`] for board coordinates
//! - [`Move`] for coordinate move requests
//! - FEN position parsing

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveParseError};
pub use piece::{Piece, PieceKind, Promotion};
pub use square::Square;
