//! Process-scoped lookup data shared by every board.

use std::fmt;

use tracing::debug;

use crate::movegen::AttackTables;
use crate::{EngineConfig, ZobristKeys};

/// Sliding attack tables plus Zobrist keys.
///
/// Built once, wrapped in an `Arc`, and handed to each [`Board`]. Boards
/// that share a `Tables` can compare hashes; nothing in here is mutated
/// after construction.
///
/// [`Board`]: crate::Board
pub struct Tables {
    attacks: AttackTables,
    keys: ZobristKeys,
}

impl Tables {
    /// Tables with Zobrist keys drawn from OS entropy.
    pub fn new() -> Self {
        Self::with_keys(ZobristKeys::from_entropy())
    }

    /// Tables with deterministic Zobrist keys.
    pub fn seeded(seed: u64) -> Self {
        debug!(seed, "seeding zobrist keys");
        Self::with_keys(ZobristKeys::seeded(seed))
    }

    /// Tables as described by `config.hash_seed`.
    pub fn from_config(config: &EngineConfig) -> Self {
        match config.hash_seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    /// Tables around a caller-supplied key set.
    pub fn with_keys(keys: ZobristKeys) -> Self {
        Tables {
            attacks: AttackTables::new(),
            keys,
        }
    }

    /// Magic lookups for sliding pieces.
    #[inline]
    pub fn attacks(&self) -> &AttackTables {
        &self.attacks
    }

    /// Zobrist keys for position hashing.
    #[inline]
    pub fn keys(&self) -> &ZobristKeys {
        &self.keys
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tables").finish_non_exhaustive()
    }
}
