//! Step tables and raw per-piece target generation.
//!
//! Everything here ignores castling and self-check. These are the squares a
//! piece reaches by its movement pattern on the current board, which is
//! exactly what check detection needs.

use super::TargetList;
use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

/// Knight jumps as (file, rank) steps.
pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-1, -2),
    (-2, -1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (1, 2),
    (2, 1),
];

/// King steps to the eight neighbours.
pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Rook ray directions.
pub const STRAIGHT_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

/// Bishop ray directions.
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns the squares `piece` on `from` can reach by its movement pattern,
/// excluding squares held by its own color.
pub fn raw_targets(board: &Board, from: Square, piece: Piece) -> TargetList {
    let mut targets = TargetList::new();

    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, from, piece.color, &mut targets),
        PieceKind::Knight => step_targets(from, &KNIGHT_STEPS, &mut targets),
        PieceKind::King => step_targets(from, &KING_STEPS, &mut targets),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {}
    }
    if piece.kind.slides_straight() {
        ray_targets(board, from, &STRAIGHT_DIRECTIONS, &mut targets);
    }
    if piece.kind.slides_diagonally() {
        ray_targets(board, from, &DIAGONAL_DIRECTIONS, &mut targets);
    }

    targets.retain(|&to| board.color_at(to) != Some(piece.color));
    targets
}

/// Pawn pushes onto empty squares and diagonal captures onto occupied ones.
fn pawn_targets(board: &Board, from: Square, color: Color, targets: &mut TargetList) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
        targets.push(one);
        if from.rank() == color.pawn_rank() {
            if let Some(two) = from.offset(0, 2 * dir).filter(|&sq| board.is_empty(sq)) {
                targets.push(two);
            }
        }
    }

    for file_step in [1, -1] {
        if let Some(to) = from.offset(file_step, dir) {
            if !board.is_empty(to) {
                targets.push(to);
            }
        }
    }
}

fn step_targets(from: Square, steps: &[(i8, i8)], targets: &mut TargetList) {
    for &(df, dr) in steps {
        if let Some(to) = from.offset(df, dr) {
            targets.push(to);
        }
    }
}

/// Walks each ray until it leaves the board or hits a piece; the blocking
/// square is included.
fn ray_targets(board: &Board, from: Square, directions: &[(i8, i8)], targets: &mut TargetList) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            targets.push(to);
            if !board.is_empty(to) {
                break;
            }
            current = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn names(targets: &TargetList) -> Vec<String> {
        let mut names: Vec<String> = targets.iter().map(|s| s.to_algebraic()).collect();
        names.sort();
        names
    }

    #[test]
    fn knight_in_corner() {
        let knight = Piece::new(PieceKind::Knight, Color::White);
        let targets = raw_targets(&Board::empty(), Square::A1, knight);
        assert_eq!(names(&targets), vec!["b3", "c2"]);
    }

    #[test]
    fn king_in_center() {
        let king = Piece::new(PieceKind::King, Color::Black);
        let targets = raw_targets(&Board::empty(), sq("d4"), king);
        assert_eq!(targets.len(), 8);
    }

    #[test]
    fn rook_stops_at_blockers() {
        let mut board = Board::empty();
        board.set(sq("d6"), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        board.set(sq("f4"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        let rook = Piece::new(PieceKind::Rook, Color::White);
        let targets = raw_targets(&board, sq("d4"), rook);
        assert_eq!(
            names(&targets),
            vec!["a4", "b4", "c4", "d1", "d2", "d3", "d5", "d6", "e4"]
        );
    }

    #[test]
    fn queen_covers_both_directions() {
        let queen = Piece::new(PieceKind::Queen, Color::White);
        let targets = raw_targets(&Board::empty(), sq("d4"), queen);
        assert_eq!(targets.len(), 27);
    }

    #[test]
    fn bishop_rays() {
        let bishop = Piece::new(PieceKind::Bishop, Color::Black);
        let targets = raw_targets(&Board::empty(), Square::C8, bishop);
        assert_eq!(targets.len(), 7);
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let mut board = Board::empty();
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        board.set(sq("e2"), Some(pawn));
        board.set(sq("d3"), Some(Piece::new(PieceKind::Knight, Color::Black)));
        board.set(sq("f3"), Some(Piece::new(PieceKind::Knight, Color::White)));
        let targets = raw_targets(&board, sq("e2"), pawn);
        assert_eq!(names(&targets), vec!["d3", "e3", "e4"]);
    }

    #[test]
    fn pawn_double_push_needs_both_squares_empty() {
        let mut board = Board::empty();
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        board.set(sq("c7"), Some(pawn));
        board.set(sq("c6"), Some(Piece::new(PieceKind::Bishop, Color::White)));
        assert!(raw_targets(&board, sq("c7"), pawn).is_empty());

        board.set(sq("c6"), None);
        board.set(sq("c5"), Some(Piece::new(PieceKind::Bishop, Color::White)));
        assert_eq!(names(&raw_targets(&board, sq("c7"), pawn)), vec!["c6"]);
    }

    #[test]
    fn pawn_on_edge_file() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let mut board = Board::empty();
        board.set(sq("a5"), Some(pawn));
        board.set(sq("b6"), Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_eq!(names(&raw_targets(&board, sq("a5"), pawn)), vec!["a6", "b6"]);
    }
}
