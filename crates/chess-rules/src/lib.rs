//! Rules engine for two-player chess on a mailbox board.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of optional pieces
//! - [`GameState`] - board, side to move, castling rights and check flags
//! - [`Game`] - turn control with promotion prompts, outcome signals and a
//!   single-slot undo
//! - Move generation, check detection and the self-check legality filter
//!
//! # Architecture
//!
//! Every piece's destinations come from walking its step or ray table over
//! the board. A candidate is legal when the mover's king is not attacked on
//! a scratch copy of the board with the move played. The board is 64 bytes
//! and `Copy`, so these speculative copies are cheap.
//!
//! En passant is not generated, and the squares a castling king passes over
//! are not tested for attack.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Promotion, Square};
//! use chess_rules::{Game, GameEvent, MoveStatus};
//!
//! let mut game = Game::new();
//! let b1 = Square::from_algebraic("b1").unwrap();
//! println!("Knight on b1 can reach {:?}", game.legal_targets(b1).unwrap());
//!
//! for mv in ["f2f3", "e7e5", "g2g4"] {
//!     game.commit_move(mv.parse().unwrap()).unwrap();
//! }
//! let d8 = Square::from_algebraic("d8").unwrap();
//! let h4 = Square::from_algebraic("h4").unwrap();
//! let status = game.try_move(d8, h4, &mut Promotion::Queen).unwrap();
//! if let MoveStatus::Accepted(report) = status {
//!     assert!(report.events.contains(&GameEvent::Checkmate(Color::White)));
//! }
//! ```

mod apply;
mod board;
mod castling;
pub mod check;
mod error;
mod game;
pub mod movegen;
mod outcome;
mod state;

pub use apply::{apply_move, needs_promotion, AppliedMove};
pub use board::Board;
pub use castling::{CastlingRights, CastlingSide};
pub use check::{is_in_check, is_square_attacked, would_cause_self_check};
pub use error::EngineError;
pub use game::{Game, GameEvent, MoveReport, MoveStatus, PromotionHandler};
pub use movegen::{has_legal_move, legal_moves, legal_targets, pseudo_legal_targets, TargetList};
pub use outcome::{evaluate, is_checkmate, is_stalemate, Outcome};
pub use state::{CheckFlags, GameState};
