//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions count once per destination square and en passant is never
//! generated, so only positions where neither matters give the published
//! numbers.

use super::legal_moves;
use crate::apply::apply_move;
use crate::{EngineError, GameState};
use chess_core::Promotion;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(state: &GameState, depth: u32) -> Result<u64, EngineError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = legal_moves(&state.board, state.castling, state.side_to_move)?;

    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut next = *state;
        apply_move(&mut next, m.from, m.to, Some(Promotion::Queen))?;
        nodes += perft(&next, depth - 1)?;
    }
    Ok(nodes)
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(state: &GameState, depth: u32) -> Result<Vec<(String, u64)>, EngineError> {
    let moves = legal_moves(&state.board, state.castling, state.side_to_move)?;
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut next = *state;
        apply_move(&mut next, m.from, m.to, Some(Promotion::Queen))?;
        let nodes = if depth > 1 {
            perft(&next, depth - 1)?
        } else {
            1
        };
        results.push((m.to_coordinate(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Starting position perft values (well-known and verified)
    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&GameState::startpos(), 1), Ok(20));
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&GameState::startpos(), 2), Ok(400));
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&GameState::startpos(), 3), Ok(8902));
    }

    // The mailbox generator is slow at this depth.
    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&GameState::startpos(), 4), Ok(197281));
    }

    // Kiwipete: castling both ways, pins and captures.
    #[test]
    fn perft_kiwipete_depth_1() {
        let state = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&state, 1), Ok(48));
    }

    // Rook and king endgame with a pinned-pawn line.
    #[test]
    fn perft_position3_depth_1() {
        let state = GameState::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&state, 1), Ok(14));
    }

    #[test]
    fn perft_divide_works() {
        let results = perft_divide(&GameState::startpos(), 1).unwrap();
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 20);
        assert_eq!(results[0].0, "a2a3");
    }
}
