//! Zobrist position keys.
//!
//! A position's key XORs together:
//! - one random key per (color, piece, square) for every occupied square
//! - one key per castling right currently held
//! - one key for the en passant file, if a target square is set
//! - one key when White is to move
//!
//! Keys are drawn once per process (or from a fixed seed) and never
//! persisted, so hashes are only comparable within one set of [`Tables`].
//!
//! [`Tables`]: crate::Tables

use chess_core::{Color, File, Piece, Square};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Board;

/// Random keys for every hashed feature of a position.
#[derive(Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    /// Keys for pieces: [color][piece][square].
    pieces: [[[u64; 64]; 6]; 2],
    /// Keys for the four castling rights, in `CastlingRights` bit order.
    castling: [u64; 4],
    /// Keys for the en passant file.
    en_passant: [u64; 8],
    white_to_move: u64,
}

impl ZobristKeys {
    /// Draws a full key set from `rng`.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut pieces = [[[0u64; 64]; 6]; 2];
        for key in pieces.iter_mut().flatten().flatten() {
            *key = rng.gen();
        }
        let mut castling = [0u64; 4];
        rng.fill(&mut castling[..]);
        let mut en_passant = [0u64; 8];
        rng.fill(&mut en_passant[..]);

        ZobristKeys {
            pieces,
            castling,
            en_passant,
            white_to_move: rng.gen(),
        }
    }

    /// Deterministic keys, identical for every call with the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(&mut StdRng::seed_from_u64(seed))
    }

    /// Keys seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(&mut StdRng::from_entropy())
    }

    #[inline]
    pub fn piece(&self, piece: Piece, color: Color, sq: Square) -> u64 {
        self.pieces[color.index()][piece.index()][sq.index() as usize]
    }

    /// Key for castling right `bit` (0-3).
    #[inline]
    pub fn castling(&self, bit: usize) -> u64 {
        self.castling[bit]
    }

    #[inline]
    pub fn en_passant(&self, file: File) -> u64 {
        self.en_passant[file.index() as usize]
    }

    #[inline]
    pub fn white_to_move(&self) -> u64 {
        self.white_to_move
    }
}

impl Board {
    /// Computes the position key from scratch.
    pub fn zobrist_hash(&self) -> u64 {
        let keys = self.tables().keys();
        let mut hash = 0u64;

        for color in Color::ALL {
            for piece in Piece::ALL {
                for sq in self.pieces_of(piece, color) {
                    hash ^= keys.piece(piece, color, sq);
                }
            }
        }

        let rights = self.castling_rights().raw();
        for bit in 0..4 {
            if rights & (1 << bit) != 0 {
                hash ^= keys.castling(bit);
            }
        }

        if let Some(ep) = self.en_passant() {
            hash ^= keys.en_passant(ep.file());
        }

        if self.side_to_move() == Color::White {
            hash ^= keys.white_to_move();
        }

        hash
    }
}
