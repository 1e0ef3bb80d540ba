//! Move application.

use chess_core::{Color, Move, Piece, Square};
use thiserror::Error;
use tracing::debug;

use crate::Board;

/// Moves `act` refuses to apply.
///
/// Only internal inconsistencies are caught here; legality is the caller's
/// job. A rejected move leaves the board untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("{0} promotes a piece that is not a pawn")]
    PromotionWithoutPawn(Move),
}

impl Board {
    /// Applies `mv` and records the new position key.
    ///
    /// The move is assumed legal. When `update` is set the game state is
    /// reclassified afterwards.
    pub fn act(&mut self, mv: Move, update: bool) -> Result<(), MoveError> {
        let (piece, color) = self
            .piece_at(mv.from())
            .ok_or(MoveError::EmptySquare(mv.from()))?;
        if mv.promotion().is_some() && piece != Piece::Pawn {
            return Err(MoveError::PromotionWithoutPawn(mv));
        }

        self.make(mv, piece, color);
        let hash = self.zobrist_hash();
        self.history.push(hash);
        debug!(
            mv = %mv,
            hash,
            halfmove_clock = self.halfmove_clock,
            "applied move"
        );

        if update {
            self.update_game_state();
        }
        Ok(())
    }

    /// The board transition itself, without hashing or classification.
    ///
    /// `piece` and `color` describe what stands on the origin square.
    pub(crate) fn make(&mut self, mv: Move, piece: Piece, color: Color) {
        let from = mv.from();
        let to = mv.to();

        self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        if piece == Piece::Pawn || self.occupied.contains(to) {
            self.halfmove_clock = 0;
        }

        if piece == Piece::Pawn && self.en_passant == Some(to) {
            if let Some(passed) = to.offset(-color.pawn_step()) {
                self.pieces[Piece::Pawn.index()].clear(passed);
                self.colors[color.opposite().index()].clear(passed);
                self.occupied.clear(passed);
            }
        }
        self.en_passant = None;
        if piece == Piece::Pawn && from.index().abs_diff(to.index()) == 16 {
            self.en_passant = from.offset(color.pawn_step());
        }

        // promote on the origin square; relocation carries the new piece over
        if let Some(promotion) = mv.promotion() {
            self.pieces[Piece::Pawn.index()].clear(from);
            self.pieces[promotion.piece().index()].set(from);
        }

        self.castling.touch(from);
        self.castling.touch(to);

        if piece == Piece::King && from.index().abs_diff(to.index()) == 2 {
            let rook = if to.index() > from.index() {
                from.offset(3).zip(from.offset(1))
            } else {
                from.offset(-4).zip(from.offset(-1))
            };
            if let Some((rook_from, rook_to)) = rook {
                self.relocate(rook_from, rook_to);
            }
        }

        self.relocate(from, to);

        self.side_to_move = self.side_to_move.opposite();
        self.fullmove_number = self.fullmove_number.saturating_add(1);
    }

    fn relocate(&mut self, from: Square, to: Square) {
        for bb in self.pieces.iter_mut().chain(self.colors.iter_mut()) {
            bb.relocate(from, to);
        }
        self.occupied.relocate(from, to);
    }
}
