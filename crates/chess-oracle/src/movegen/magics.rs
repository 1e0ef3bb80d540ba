//! Magic-bitboard lookup for sliding pieces.
//!
//! For each origin the relevance mask holds the squares on the piece's rays,
//! minus the board edge. Every subset of that mask is hashed with a
//! per-square multiplier into a fixed-stride slot holding the exact attack
//! set, blockers included. Lookup is a mask, a multiply and a shift.

use crate::Bitboard;
use chess_core::Square;
use tracing::debug;

/// Slots reserved per bishop origin.
pub const BISHOP_STRIDE: usize = 1024;

/// Slots reserved per rook origin.
pub const ROOK_STRIDE: usize = 4096;

/// Hashing parameters for one origin square.
#[derive(Debug, Clone, Copy)]
struct Magic {
    mask: Bitboard,
    magic: u64,
    shift: u8,
}

impl Magic {
    #[inline]
    fn index(&self, occupied: Bitboard) -> usize {
        let relevant = occupied & self.mask;
        (relevant.0.wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// Read-only sliding attack tables, built once and shared.
pub struct AttackTables {
    bishop_magics: [Magic; 64],
    rook_magics: [Magic; 64],
    bishop_table: Vec<Bitboard>,
    rook_table: Vec<Bitboard>,
}

// Multipliers mapping each bishop relevance subset to a distinct slot.
const BISHOP_MAGICS: [u64; 64] = [
    0x89a1121896040240,
    0x2004844802002010,
    0x2068080051921000,
    0x62880a0220200808,
    0x0004042004000000,
    0x0100822020200011,
    0xc00444222012000a,
    0x0028808801216001,
    0x0400492088408100,
    0x0201c401040c0084,
    0x00840800910a0010,
    0x0000082080240060,
    0x2000840504006000,
    0x30010c4108405004,
    0x1008005410080802,
    0x8144042209100900,
    0x0208081020014400,
    0x004800201208ca00,
    0x0f18140408012008,
    0x1004002802102001,
    0x0841000820080811,
    0x0040200200a42008,
    0x0000800054042000,
    0x88010400410c9000,
    0x0520040470104290,
    0x1004040051500081,
    0x2002081833080021,
    0x000400c00c010142,
    0x941408200c002000,
    0x0658810000806011,
    0x0188071040440a00,
    0x4800404002011c00,
    0x0104442040404200,
    0x02880804000811e0,
    0x0004022401120400,
    0x80c0040400080120,
    0x8040010040820802,
    0x0480810700020090,
    0x0102008e00040242,
    0x0809005202050100,
    0x8002024220104080,
    0x0431008804142000,
    0x0019001802081400,
    0x0200014208040080,
    0x3308082008200100,
    0x041010500040c020,
    0x4012020c04210308,
    0x208220a202004080,
    0x0111040120082000,
    0x6803040141280a00,
    0x2101004202410000,
    0x8200000041108022,
    0x0000021082088000,
    0x0002410204010040,
    0x0040100400809000,
    0x0822088220820214,
    0x0040808090012004,
    0x00910224040218c9,
    0x0402814422015008,
    0x0090014004842410,
    0x0001000042304105,
    0x0010008830412a00,
    0x2520081090008908,
    0x40102000a0a60140,
];

const ROOK_MAGICS: [u64; 64] = [
    0x0a8002c000108020,
    0x06c00049b0002001,
    0x0100200010090040,
    0x2480041000800801,
    0x0280028004000800,
    0x0900410008040022,
    0x0280020001001080,
    0x2880002041000080,
    0xa000800080400034,
    0x0004808020004000,
    0x2290802004801000,
    0x0411000d00100020,
    0x0402800800040080,
    0x000b000401004208,
    0x2409000100040200,
    0x0001002100004082,
    0x0022878001e24000,
    0x1090810021004010,
    0x0801030040200012,
    0x0500808008001000,
    0x0a08018014000880,
    0x8000808004000200,
    0x0201008080010200,
    0x0801020000441091,
    0x0000800080204005,
    0x1040200040100048,
    0x0000120200402082,
    0x0d14880480100080,
    0x0012040280080080,
    0x0100040080020080,
    0x9020010080800200,
    0x0813241200148449,
    0x0491604001800080,
    0x0100401000402001,
    0x4820010021001040,
    0x0400402202000812,
    0x0209009005000802,
    0x0810800601800400,
    0x4301083214000150,
    0x204026458e001401,
    0x0040204000808000,
    0x8001008040010020,
    0x8410820820420010,
    0x1003001000090020,
    0x0804040008008080,
    0x0012000810020004,
    0x1000100200040208,
    0x430000a044020001,
    0x0280009023410300,
    0x00e0100040002240,
    0x0000200100401700,
    0x2244100408008080,
    0x0008000400801980,
    0x0002000810040200,
    0x8010100228810400,
    0x2000009044210200,
    0x4080008040102101,
    0x0040002080411d01,
    0x2005524060000901,
    0x0502001008400422,
    0x489a000810200402,
    0x0001004400080a13,
    0x4000011008020084,
    0x0026002114058042,
];

// Population count of each relevance mask.
const BISHOP_BITS: [u8; 64] = [
    6, 5, 5, 5, 5, 5, 5, 6,
    5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 7, 7, 7, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 7, 7, 7, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5,
    6, 5, 5, 5, 5, 5, 5, 6,
];

const ROOK_BITS: [u8; 64] = [
    12, 11, 11, 11, 11, 11, 11, 12,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    12, 11, 11, 11, 11, 11, 11, 12,
];

impl AttackTables {
    /// Builds both tables by enumerating every blocker subset of every mask.
    pub fn new() -> Self {
        let (bishop_magics, bishop_table) =
            build(&BISHOP_MAGICS, &BISHOP_BITS, BISHOP_STRIDE, &BISHOP_RAYS);
        let (rook_magics, rook_table) = build(&ROOK_MAGICS, &ROOK_BITS, ROOK_STRIDE, &ROOK_RAYS);
        debug!(
            bishop_slots = bishop_table.len(),
            rook_slots = rook_table.len(),
            "built sliding attack tables"
        );
        AttackTables {
            bishop_magics,
            rook_magics,
            bishop_table,
            rook_table,
        }
    }

    /// Bishop attacks from `sq` given the full occupancy.
    #[inline]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let i = sq.index() as usize;
        self.bishop_table[i * BISHOP_STRIDE + self.bishop_magics[i].index(occupied)]
    }

    /// Rook attacks from `sq` given the full occupancy.
    #[inline]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let i = sq.index() as usize;
        self.rook_table[i * ROOK_STRIDE + self.rook_magics[i].index(occupied)]
    }

    /// Union of the bishop and rook lookups.
    #[inline]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupied) | self.rook_attacks(sq, occupied)
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn build(
    magics: &[u64; 64],
    bits: &[u8; 64],
    stride: usize,
    rays: &[(i8, i8); 4],
) -> ([Magic; 64], Vec<Bitboard>) {
    let mut table = vec![Bitboard::EMPTY; 64 * stride];
    let entries = std::array::from_fn(|sq| {
        let magic = Magic {
            mask: relevance_mask(sq as u8, rays),
            magic: magics[sq],
            shift: 64 - bits[sq],
        };
        // carry-rippler walk over every subset of the mask
        let mut blockers = Bitboard::EMPTY;
        loop {
            table[sq * stride + magic.index(blockers)] = ray_attacks(sq as u8, blockers, rays);
            blockers = Bitboard(blockers.0.wrapping_sub(magic.mask.0) & magic.mask.0);
            if blockers.is_empty() {
                break;
            }
        }
        magic
    });
    (entries, table)
}

/// Squares along `rays` from `sq`, excluding the last square before the edge.
fn relevance_mask(sq: u8, rays: &[(i8, i8); 4]) -> Bitboard {
    let rank = (sq / 8) as i8;
    let file = (sq % 8) as i8;
    let mut mask = 0u64;
    for &(dr, df) in rays {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&(r + dr)) && (0..8).contains(&(f + df)) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    Bitboard(mask)
}

/// Ray-cast attacks from `sq`, stopping at and including the first blocker.
fn ray_attacks(sq: u8, blockers: Bitboard, rays: &[(i8, i8); 4]) -> Bitboard {
    let rank = (sq / 8) as i8;
    let file = (sq % 8) as i8;
    let mut attacks = 0u64;
    for &(dr, df) in rays {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if blockers.0 & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    Bitboard(attacks)
}
