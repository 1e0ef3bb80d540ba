//! Game-termination rules.
//!
//! [`Board::classify`] runs the checks in a fixed order and later draws
//! overwrite earlier results:
//! 1. no legal move: checkmate if in check, otherwise stalemate
//! 2. insufficient material
//! 3. fifty-move rule (half-move clock at 100)
//! 4. threefold repetition

use std::fmt;

use chess_core::{Color, Piece};
use tracing::info;

use crate::Board;

/// Half-moves without a pawn move or capture that end the game.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Earlier occurrences of the current position that end the game.
pub const REPETITION_LIMIT: usize = 2;

/// Outcome classification of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Playing,
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameState {
    /// The boundary text: `"playing"`, `"checkmate"` (either winner) or `"draw"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            GameState::Playing => "playing",
            GameState::WhiteWin | GameState::BlackWin => "checkmate",
            GameState::Draw => "draw",
        }
    }

    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameState::Playing)
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            GameState::WhiteWin => Some(Color::White),
            GameState::BlackWin => Some(Color::Black),
            _ => None,
        }
    }

    const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameState::WhiteWin,
            Color::Black => GameState::BlackWin,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Board {
    /// Classifies the current position without storing the result.
    pub fn classify(&self) -> GameState {
        let mover = self.side_to_move;
        let mut state = GameState::Playing;

        if !self.has_legal_move() {
            state = if self.is_player_in_check(mover) {
                GameState::win_for(mover.opposite())
            } else {
                GameState::Draw
            };
        }
        if !self.has_mating_material() {
            state = GameState::Draw;
        }
        if self.halfmove_clock >= FIFTY_MOVE_PLIES {
            state = GameState::Draw;
        }
        if self.repetition_count() >= REPETITION_LIMIT {
            state = GameState::Draw;
        }

        state
    }

    /// Recomputes and stores the game state.
    pub fn update_game_state(&mut self) -> GameState {
        let state = self.classify();
        if state.is_over() && state != self.state {
            info!(state = %state, winner = ?state.winner(), fen = %self.to_fen(), "game over");
        }
        self.state = state;
        state
    }

    /// False once only kings and at most one minor piece per side remain.
    pub fn has_mating_material(&self) -> bool {
        let heavy = self.pieces(Piece::Pawn) | self.pieces(Piece::Rook) | self.pieces(Piece::Queen);
        if heavy.is_not_empty() {
            return true;
        }
        Color::ALL.into_iter().any(|color| {
            (self.pieces_of(Piece::Knight, color) | self.pieces_of(Piece::Bishop, color)).count() > 1
        })
    }

    /// How often the current position occurred before with the same side to
    /// move, not counting the current occurrence.
    pub fn repetition_count(&self) -> usize {
        let Some((current, earlier)) = self.history.split_last() else {
            return 0;
        };
        earlier
            .iter()
            .rev()
            .skip(1)
            .step_by(2)
            .filter(|&hash| hash == current)
            .count()
    }
}
