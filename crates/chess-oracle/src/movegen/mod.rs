//! Move generation.
//!
//! Generation works per origin square and returns destination sets:
//! [`Board::generate_moves`] applies piece geometry and occupancy only,
//! [`Board::generate_legal_moves`] adds castling and drops every destination
//! that leaves the mover's king attacked. Legality is tested by playing the
//! move on a scratch copy of the board.

mod attacks;
mod magics;
pub mod perft;

use chess_core::{Color, Move, Piece, Promotion, Square};

use crate::{Bitboard, Board};

pub use attacks::{king_attacks, knight_attacks, pawn_attacks};
pub use magics::{AttackTables, BISHOP_STRIDE, ROOK_STRIDE};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so a fixed-size array
/// avoids heap allocation during generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    const FILLER: Move = Move::normal(Square::A1, Square::A1);

    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Self::FILLER; Self::MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Squares strictly between king and rook, and the squares the king
/// stands on, crosses and lands on, for White. Black's are these shifted
/// up seven ranks.
const KINGSIDE_BETWEEN: u64 = 0x60;
const KINGSIDE_PATH: u64 = 0x70;
const QUEENSIDE_BETWEEN: u64 = 0x0E;
const QUEENSIDE_PATH: u64 = 0x1C;

impl Board {
    /// Pseudo-legal destinations of the piece on `sq`.
    ///
    /// Own pieces are excluded and board edges respected; check and
    /// castling are not considered. An empty square yields no moves.
    pub fn generate_moves(&self, sq: Square) -> Bitboard {
        let Some((piece, color)) = self.piece_at(sq) else {
            return Bitboard::EMPTY;
        };
        let own = self.color(color);
        let attacks = self.tables.attacks();

        match piece {
            Piece::Pawn => self.pawn_moves(sq, color),
            Piece::Knight => knight_attacks(sq) & !own,
            Piece::Bishop => attacks.bishop_attacks(sq, self.occupied) & !own,
            Piece::Rook => attacks.rook_attacks(sq, self.occupied) & !own,
            Piece::Queen => attacks.queen_attacks(sq, self.occupied) & !own,
            Piece::King => king_attacks(sq) & !own,
        }
    }

    fn pawn_moves(&self, sq: Square, color: Color) -> Bitboard {
        let step = color.pawn_step();
        let mut moves = Bitboard::EMPTY;

        if let Some(single) = sq.offset(step).filter(|to| !self.occupied.contains(*to)) {
            moves.set(single);
            if sq.rank() == color.pawn_rank() {
                if let Some(double) = single.offset(step).filter(|to| !self.occupied.contains(*to))
                {
                    moves.set(double);
                }
            }
        }

        let mut targets = self.color(color.opposite());
        if let Some(ep) = self.en_passant.filter(|_| color == self.side_to_move) {
            targets.set(ep);
        }
        moves | (pawn_attacks(sq, color) & targets)
    }

    /// Every square a piece of `by` could move to or capture on.
    ///
    /// The union of their pseudo-legal destinations plus every pawn's
    /// diagonal capture squares, occupied or not.
    pub fn attacked_squares(&self, by: Color) -> Bitboard {
        let mut attacked = Bitboard::EMPTY;
        for sq in self.color(by) {
            attacked |= self.generate_moves(sq);
        }
        for sq in self.pieces_of(Piece::Pawn, by) {
            attacked |= pawn_attacks(sq, by);
        }
        attacked
    }

    /// True if some opposing piece could move onto `color`'s king.
    pub fn is_player_in_check(&self, color: Color) -> bool {
        let Some(king) = self.king_square(color) else {
            return false;
        };
        self.color(color.opposite())
            .into_iter()
            .any(|sq| self.generate_moves(sq).contains(king))
    }

    /// Legal destinations of the piece on `sq`, castling included.
    pub fn generate_legal_moves(&self, sq: Square) -> Bitboard {
        let Some((piece, color)) = self.piece_at(sq) else {
            return Bitboard::EMPTY;
        };

        let mut candidates = self.generate_moves(sq);
        if piece == Piece::King {
            candidates |= self.castling_moves(sq, color);
        }

        candidates
            .into_iter()
            .filter(|&to| {
                let mut scratch = self.clone();
                scratch.make(Move::normal(sq, to), piece, color);
                !scratch.is_player_in_check(color)
            })
            .collect()
    }

    fn castling_moves(&self, sq: Square, color: Color) -> Bitboard {
        let (home, shift) = match color {
            Color::White => (Square::E1, 0),
            Color::Black => (Square::E8, 56),
        };
        if sq != home {
            return Bitboard::EMPTY;
        }

        let rights = self.castling;
        let kingside = rights.can_castle_kingside(color)
            && (self.occupied.0 & (KINGSIDE_BETWEEN << shift)) == 0;
        let queenside = rights.can_castle_queenside(color)
            && (self.occupied.0 & (QUEENSIDE_BETWEEN << shift)) == 0;
        if !kingside && !queenside {
            return Bitboard::EMPTY;
        }

        let attacked = self.attacked_squares(color.opposite());
        let mut moves = Bitboard::EMPTY;
        if kingside && (attacked.0 & (KINGSIDE_PATH << shift)) == 0 {
            moves |= Bitboard(1 << (home.index() + 2));
        }
        if queenside && (attacked.0 & (QUEENSIDE_PATH << shift)) == 0 {
            moves |= Bitboard(1 << (home.index() - 2));
        }
        moves
    }

    /// All legal moves for the side to move.
    ///
    /// A pawn move onto the last rank appears four times, once per
    /// promotion piece, queen first.
    pub fn legal_moves(&self) -> MoveList {
        let us = self.side_to_move;
        let mut moves = MoveList::new();

        for from in self.color(us) {
            let promotes = self.pieces(Piece::Pawn).contains(from);
            for to in self.generate_legal_moves(from) {
                if promotes && to.rank() == us.promotion_rank() {
                    for promotion in Promotion::ALL {
                        moves.push(Move::promoting(from, to, promotion));
                    }
                } else {
                    moves.push(Move::normal(from, to));
                }
            }
        }

        moves
    }

    /// True if the side to move has at least one legal move.
    pub fn has_legal_move(&self) -> bool {
        self.color(self.side_to_move)
            .into_iter()
            .any(|sq| self.generate_legal_moves(sq).is_not_empty())
    }
}
