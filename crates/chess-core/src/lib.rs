//! Core types for chess.
//!
//! This crate provides the fundamental types used by the rules oracle:
//! - [`Piece`], [`Promotion`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] and its text form (`e2e4`, `e7e8q`)
//! - FEN field parsing

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveParseError};
pub use piece::{Piece, Promotion};
pub use square::{File, Rank, Square};
