//! The engine façade: one live board plus the moves played on it.

use std::sync::Arc;

use chess_core::{FenError, Move, MoveParseError, Piece};
use thiserror::Error;
use tracing::debug;

use crate::{Board, EngineConfig, GameState, MoveError, MoveList, Tables};

/// Errors returned by [`Engine::act`] and [`Engine::play`].
///
/// Malformed text and illegal moves are distinct; in both cases the board
/// is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("malformed move: {0}")]
    Malformed(#[from] MoveParseError),

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("game is over ({0})")]
    GameOver(GameState),

    #[error(transparent)]
    Board(#[from] MoveError),
}

/// A single game driven by move text.
///
/// Each engine owns its board; several engines may share one [`Tables`].
/// Calls that mutate must be serialised by the caller.
#[derive(Debug, Clone)]
pub struct Engine {
    tables: Arc<Tables>,
    start: Board,
    board: Board,
    moves: Vec<Move>,
}

impl Engine {
    /// A game from the standard start with fresh, entropy-seeded tables.
    pub fn new() -> Self {
        Self::with_tables(Arc::new(Tables::new()))
    }

    /// A game from the standard start using shared tables.
    pub fn with_tables(tables: Arc<Tables>) -> Self {
        let board = Board::startpos(tables.clone());
        Self::from_board(tables, board)
    }

    /// A game from `fen` using shared tables.
    pub fn from_fen(tables: Arc<Tables>, fen: &str) -> Result<Self, FenError> {
        let board = Board::from_fen(tables.clone(), fen)?;
        Ok(Self::from_board(tables, board))
    }

    /// Builds tables and the start position from `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, FenError> {
        Self::from_fen(Arc::new(Tables::from_config(config)), &config.start_fen)
    }

    fn from_board(tables: Arc<Tables>, mut board: Board) -> Self {
        board.update_game_state();
        Engine {
            tables,
            start: board.clone(),
            board,
            moves: Vec::new(),
        }
    }

    /// Returns to the start position and forgets the move history.
    pub fn reset(&mut self) {
        self.board = self.start.clone();
        self.moves.clear();
    }

    /// Parses, validates and plays a move given as text.
    pub fn act(&mut self, text: &str) -> Result<Move, EngineError> {
        let mv = Move::from_uci(text).inspect_err(|err| {
            debug!(text, %err, "rejected malformed move");
        })?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Validates and plays `mv`, then reclassifies the game.
    pub fn play(&mut self, mv: Move) -> Result<(), EngineError> {
        let state = self.board.game_state();
        if state.is_over() {
            debug!(mv = %mv, %state, "rejected move after game end");
            return Err(EngineError::GameOver(state));
        }
        if !self.is_legal_move(mv) {
            debug!(mv = %mv, fen = %self.board.to_fen(), "rejected illegal move");
            return Err(EngineError::IllegalMove(mv));
        }
        self.board.act(mv, true)?;
        self.moves.push(mv);
        Ok(())
    }

    /// True if the side to move may play `mv` here.
    ///
    /// A promotion letter is required exactly when a pawn reaches the last
    /// rank.
    pub fn is_legal_move(&self, mv: Move) -> bool {
        let us = self.board.side_to_move();
        let Some((piece, color)) = self.board.piece_at(mv.from()) else {
            return false;
        };
        if color != us {
            return false;
        }
        let reaches_last_rank = piece == Piece::Pawn && mv.to().rank() == us.promotion_rank();
        if mv.promotion().is_some() != reaches_last_rank {
            return false;
        }
        self.board.generate_legal_moves(mv.from()).contains(mv.to())
    }

    /// Every legal move for the side to move, promotions expanded.
    pub fn legal_moves(&self) -> MoveList {
        self.board.legal_moves()
    }

    #[inline]
    pub fn game_state(&self) -> GameState {
        self.board.game_state()
    }

    /// `"playing"`, `"checkmate"` or `"draw"`.
    pub fn status(&self) -> &'static str {
        self.board.game_state().as_str()
    }

    /// True if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.is_player_in_check(self.board.side_to_move())
    }

    /// 64 characters, a1 through h8.
    pub fn board_snapshot(&self) -> String {
        self.board.snapshot()
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }

    /// Moves played since the start position, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.moves
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tables(&self) -> &Arc<Tables> {
        &self.tables
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
