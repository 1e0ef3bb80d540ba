//! FEN (Forsyth-Edwards Notation) field parsing.
//!
//! Only the piece placement is mandatory. Trailing fields may be omitted and
//! take these defaults: side to move `w`, castling `-`, en passant `-`,
//! half-move clock `0`, full-move number `0`.

use crate::{Color, Piece, Rank, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 to 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Validated FEN fields.
///
/// The board crate turns these into bitboards; this type only guarantees
/// that every field is well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Pieces on each square, a1 through h8.
    pub placement: [Option<(Piece, Color)>; 64],
    /// Side to move.
    pub active_color: Color,
    /// Castling availability letters, any subset of "KQkq" ("" for none).
    pub castling: String,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Half-moves since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Full-move number.
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string, filling in defaults for missing trailing fields.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() || parts.len() > 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = Self::parse_placement(parts[0])?;

        let active_color = match parts.get(1) {
            None => Color::White,
            Some(&s) => {
                let mut chars = s.chars();
                match (chars.next().and_then(Color::from_fen_char), chars.next()) {
                    (Some(color), None) => color,
                    _ => return Err(FenError::InvalidActiveColor(s.to_string())),
                }
            }
        };

        let castling = match parts.get(2) {
            None | Some(&"-") => String::new(),
            Some(&s) => Self::parse_castling(s)?,
        };

        let en_passant = match parts.get(3) {
            None | Some(&"-") => None,
            Some(&s) => Some(Self::parse_en_passant(s)?),
        };

        let halfmove_clock = match parts.get(4) {
            None => 0,
            Some(&s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(s.to_string()))?,
        };

        let fullmove_number = match parts.get(5) {
            None => 0,
            Some(&s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidFullmoveNumber(s.to_string()))?,
        };

        Ok(FenParser {
            placement,
            active_color,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(placement: &str) -> Result<[Option<(Piece, Color)>; 64], FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut squares = [None; 64];
        for (i, rank_str) in ranks.iter().enumerate() {
            // FEN lists rank 8 first
            let rank = 7 - i;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += digit as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if file < 8 {
                        squares[rank * 8 + file] = Some(piece);
                    }
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank + 1,
                    file
                )));
            }
        }

        Ok(squares)
    }

    fn parse_castling(castling: &str) -> Result<String, FenError> {
        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
        }
        Ok(castling.to_string())
    }

    fn parse_en_passant(ep: &str) -> Result<Square, FenError> {
        match Square::from_algebraic(ep) {
            Some(sq) if sq.rank() == Rank::R3 || sq.rank() == Rank::R6 => Ok(sq),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
