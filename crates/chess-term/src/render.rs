//! Text rendering of the board.

use crate::config::GlyphStyle;
use chess_core::{Piece, PieceKind, Square};
use chess_rules::{Board, CheckFlags, TargetList};
use std::fmt::Write;

/// Returns the character drawn for a piece.
pub fn piece_char(piece: Piece, style: GlyphStyle) -> char {
    match style {
        GlyphStyle::Unicode => piece.glyph(),
        GlyphStyle::Ascii => piece.to_fen_char(),
    }
}

/// Draws the board with rank 8 at the top.
///
/// A king in check is drawn in parentheses. Squares in `targets` are marked:
/// an empty target shows `*` and an occupied one is drawn in brackets.
pub fn render_board(
    board: &Board,
    check: CheckFlags,
    targets: &TargetList,
    style: GlyphStyle,
) -> String {
    let mut out = String::new();
    for rank in 0..8u8 {
        let _ = write!(out, "{} ", 8 - rank);
        for file in 0..8u8 {
            let Some(sq) = Square::new(file, rank) else {
                continue;
            };
            out.push_str(&cell(board.piece_at(sq), check, targets.contains(sq), style));
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h\n");
    out
}

fn cell(piece: Option<Piece>, check: CheckFlags, target: bool, style: GlyphStyle) -> String {
    match piece {
        Some(piece) if target => format!("[{}]", piece_char(piece, style)),
        Some(piece) if piece.kind == PieceKind::King && check.is_in_check(piece.color) => {
            format!("({})", piece_char(piece, style))
        }
        Some(piece) => format!(" {} ", piece_char(piece, style)),
        None if target => " * ".to_string(),
        None => " . ".to_string(),
    }
}

/// Lists a piece's destinations, e.g. `b1: a3 c3`.
pub fn render_targets(from: Square, targets: &TargetList) -> String {
    if targets.is_empty() {
        return format!("{from}: no legal moves");
    }
    let squares: Vec<String> = targets.iter().map(|sq| sq.to_algebraic()).collect();
    format!("{from}: {}", squares.join(" "))
}
