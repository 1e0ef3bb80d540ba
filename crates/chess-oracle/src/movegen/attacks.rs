//! Fixed single-step attack tables for knights, kings and pawn captures.
//!
//! Blockers never matter for these pieces, so every table is computed at
//! compile time and indexed by origin square alone.

use crate::Bitboard;
use chess_core::{Color, Square};

/// (rank, file) steps of a knight.
const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// (rank, file) steps of a king.
const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const WHITE_PAWN_STEPS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const BLACK_PAWN_STEPS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

const KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_STEPS);
const KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_STEPS);
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&WHITE_PAWN_STEPS),
    leaper_table(&BLACK_PAWN_STEPS),
];

/// Squares a knight on `sq` attacks.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Squares a king on `sq` attacks.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Diagonal capture squares of a `color` pawn on `sq`.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Builds a table of every on-board square one step away from each origin.
const fn leaper_table(steps: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0i8;
    while sq < 64 {
        let rank = sq / 8;
        let file = sq % 8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < steps.len() {
            let r = rank + steps[i].0;
            let f = file + steps[i].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                bits |= 1u64 << ((r * 8 + f) as u32);
            }
            i += 1;
        }
        table[sq as usize] = Bitboard(bits);
        sq += 1;
    }
    table
}
