//! Move representation and move text.

use crate::{Promotion, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors for move text that is not even well-formed.
///
/// Distinct from an illegal move: these strings never name a move at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move text: expected 4 or 5 characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid square in move text: '{0}'")]
    InvalidSquare(String),

    #[error("invalid promotion piece: '{0}'")]
    InvalidPromotion(char),
}

/// A move: origin, destination and optional promotion piece.
///
/// Packed into 15 bits: 6 bits from, 6 bits to, 3 bits promotion.
/// Two moves are equal iff all three fields match.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, promotion: Option<Promotion>) -> Self {
        let code = match promotion {
            Some(p) => p as u16,
            None => 0,
        };
        Move((from.index() as u16) | ((to.index() as u16) << 6) | (code << 12))
    }

    /// Creates a move without promotion.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, None)
    }

    /// Creates a promoting pawn move.
    #[inline]
    pub const fn promoting(from: Square, to: Square, promotion: Promotion) -> Self {
        Self::new(from, to, Some(promotion))
    }

    /// Returns the origin square.
    #[inline]
    pub const fn from(self) -> Square {
        // SAFETY: masked to 6 bits, always a valid square index
        unsafe { Square::from_index_unchecked((self.0 & 0x3F) as u8) }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: masked to 6 bits, always a valid square index
        unsafe { Square::from_index_unchecked(((self.0 >> 6) & 0x3F) as u8) }
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub const fn promotion(self) -> Option<Promotion> {
        Promotion::from_code((self.0 >> 12) as u8)
    }

    /// Returns the move text: origin, destination, optional promotion letter ("e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion() {
            Some(p) => format!("{}{}{}", self.from(), self.to(), p.to_char()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }

    /// Parses move text. No check or capture annotation is accepted.
    pub fn from_uci(s: &str) -> Result<Self, MoveParseError> {
        let len = s.chars().count();
        if !(4..=5).contains(&len) || !s.is_ascii() {
            return Err(MoveParseError::InvalidLength(len));
        }
        let from = Square::from_algebraic(&s[0..2])
            .ok_or_else(|| MoveParseError::InvalidSquare(s[0..2].to_string()))?;
        let to = Square::from_algebraic(&s[2..4])
            .ok_or_else(|| MoveParseError::InvalidSquare(s[2..4].to_string()))?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(Promotion::from_char(c).ok_or(MoveParseError::InvalidPromotion(c))?),
            None => None,
        };
        Ok(Move::new(from, to, promotion))
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci(s)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
