//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal-move tree to a fixed depth,
//! which can be compared against published node counts.

use chess_core::Move;

use crate::Board;

/// Plays `mv` on a copy of `board` without hashing or classification.
fn child(board: &Board, mv: Move) -> Board {
    let mut next = board.clone();
    if let Some((piece, color)) = board.piece_at(mv.from()) {
        next.make(mv, piece, color);
    }
    next
}

/// Counts the leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| perft(&child(board, mv), depth - 1))
        .sum()
}

/// Node counts below each root move, sorted by move text.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(Move, u64)> {
    let mut results: Vec<(Move, u64)> = board
        .legal_moves()
        .iter()
        .map(|&mv| {
            let nodes = if depth > 1 {
                perft(&child(board, mv), depth - 1)
            } else {
                1
            };
            (mv, nodes)
        })
        .collect();

    results.sort_by_key(|(mv, _)| mv.to_uci());
    results
}
