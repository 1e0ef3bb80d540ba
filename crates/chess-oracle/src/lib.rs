//! Chess rules oracle on a bitboard representation.
//!
//! The crate answers rules questions about a position and nothing more:
//! which moves are legal, what a move does to the board, and whether the
//! game is over. There is no search and no evaluation.
//!
//! - [`Board`] - piece placement as bitsets plus side to move, castling
//!   rights, en-passant target, clocks and the position-hash history
//! - [`Tables`] - magic attack tables and Zobrist keys, built once and
//!   shared read-only between boards through an [`Arc`](std::sync::Arc)
//! - [`Engine`] - a single game driven by UCI move text
//! - [`GameState`] - `playing`, a win for either side, or `draw`
//!
//! # Example
//!
//! ```
//! use chess_oracle::{Engine, GameState};
//!
//! let mut engine = Engine::new();
//! for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     engine.act(mv).unwrap();
//! }
//! assert_eq!(engine.game_state(), GameState::BlackWin);
//! assert_eq!(engine.status(), "checkmate");
//! ```

mod bitboard;
mod board;
mod config;
mod engine;
mod makemove;
pub mod movegen;
mod rules;
mod tables;
mod zobrist;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, CastlingRights};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineError};
pub use makemove::MoveError;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{king_attacks, knight_attacks, pawn_attacks, AttackTables, MoveList};
pub use rules::{GameState, FIFTY_MOVE_PLIES, REPETITION_LIMIT};
pub use tables::Tables;
pub use zobrist::ZobristKeys;
