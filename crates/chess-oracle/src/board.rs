//! Board state.

use std::sync::Arc;

use chess_core::{Color, FenError, FenParser, File, Piece, Rank, Square};

use crate::{Bitboard, GameState, Tables};

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Parses a validated FEN castling field ("" or any subset of "KQkq").
    pub fn from_fen(field: &str) -> Self {
        let flags = field.chars().fold(0, |flags, c| {
            flags
                | match c {
                    'K' => Self::WHITE_KINGSIDE,
                    'Q' => Self::WHITE_QUEENSIDE,
                    'k' => Self::BLACK_KINGSIDE,
                    'q' => Self::BLACK_QUEENSIDE,
                    _ => 0,
                }
        });
        CastlingRights::new(flags)
    }

    /// The FEN castling field, `-` when no right is held.
    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        .filter(|(flag, _)| self.0 & flag != 0)
        .map(|&(_, c)| c)
        .collect()
    }

    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Drops every right tied to `sq` as a king or rook start square.
    ///
    /// Rights are never re-granted, so calling this for both ends of every
    /// move keeps them exact.
    #[inline]
    pub fn touch(&mut self, sq: Square) {
        let lost = match sq {
            Square::E1 => Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE,
            Square::H1 => Self::WHITE_KINGSIDE,
            Square::A1 => Self::WHITE_QUEENSIDE,
            Square::E8 => Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE,
            Square::H8 => Self::BLACK_KINGSIDE,
            Square::A8 => Self::BLACK_QUEENSIDE,
            _ => 0,
        };
        self.0 &= !lost;
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A chess position plus the history needed to judge repetitions.
///
/// Piece-type sets are color-agnostic; a square's owner comes from the two
/// color sets. `occupied` is kept equal to the union of the color sets.
/// Cloning is a full, independent copy apart from the shared read-only
/// [`Tables`].
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) pieces: [Bitboard; 6],
    pub(crate) colors: [Bitboard; 2],
    pub(crate) occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    /// Every position key seen, oldest first, current last.
    pub(crate) history: Vec<u64>,
    pub(crate) state: GameState,
    pub(crate) tables: Arc<Tables>,
}

impl Board {
    /// Loads a position from FEN. Missing trailing fields take their defaults.
    ///
    /// The game state starts as [`GameState::Playing`] until
    /// [`Board::update_game_state`] runs.
    pub fn from_fen(tables: Arc<Tables>, fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut board = Board {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            occupied: Bitboard::EMPTY,
            side_to_move: parsed.active_color,
            castling: CastlingRights::from_fen(&parsed.castling),
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
            history: Vec::new(),
            state: GameState::Playing,
            tables,
        };

        for (sq, entry) in Square::all().zip(parsed.placement) {
            if let Some((piece, color)) = entry {
                board.put(piece, color, sq);
            }
        }

        board.history.push(board.zobrist_hash());
        Ok(board)
    }

    /// The standard starting position.
    pub fn startpos(tables: Arc<Tables>) -> Self {
        Self::from_fen(tables, FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    fn put(&mut self, piece: Piece, color: Color, sq: Square) {
        self.pieces[piece.index()].set(sq);
        self.colors[color.index()].set(sq);
        self.occupied.set(sq);
    }

    /// Serialises all six FEN fields.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                let sq = Square::new(file, rank);
                match self.piece_at(sq) {
                    Some((piece, color)) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank != Rank::R1 {
                fen.push('/');
            }
        }

        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());
        format!(
            "{} {} {} {} {} {}",
            fen,
            self.side_to_move.to_fen_char(),
            self.castling.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// One character per square, a1, b1, ..., h8; FEN letters, `.` for empty.
    pub fn snapshot(&self) -> String {
        Square::all()
            .map(|sq| match self.piece_at(sq) {
                Some((piece, color)) => piece.to_fen_char(color),
                None => '.',
            })
            .collect()
    }

    /// Returns the piece and color on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let color = if self.colors[Color::White.index()].contains(sq) {
            Color::White
        } else if self.colors[Color::Black.index()].contains(sq) {
            Color::Black
        } else {
            return None;
        };
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[piece.index()].contains(sq))
            .map(|piece| (piece, color))
    }

    /// Squares holding `piece` of either color.
    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// Squares holding any piece of `color`.
    #[inline]
    pub fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[piece.index()] & self.colors[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(Piece::King, color).lsb()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Position keys from the loaded position to the current one.
    #[inline]
    pub fn hash_history(&self) -> &[u64] {
        &self.history
    }

    /// The last classification computed by [`Board::update_game_state`].
    #[inline]
    pub fn game_state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn tables(&self) -> &Arc<Tables> {
        &self.tables
    }
}

/// Positions are equal when placement, side to move, rights, en passant
/// target and counters match. History and game state are not compared.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.colors == other.colors
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Arc<Tables> {
        Arc::new(Tables::seeded(3))
    }

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_fen_roundtrip() {
        let board = Board::startpos(tables());
        assert_eq!(board.to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn custom_fen_roundtrip() {
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Kq - 0 1",
            "8/8/8/8/8/8/8/8 b - - 99 0",
        ] {
            let board = Board::from_fen(tables(), fen).unwrap();
            assert_eq!(board.to_fen(), fen);
        }
    }

    #[test]
    fn defaults_for_missing_fields() {
        let board = Board::from_fen(tables(), "4k3/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(board.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 0");
        assert_eq!(board.castling_rights(), CastlingRights::NONE);
        assert_eq!(board.game_state(), GameState::Playing);
    }

    #[test]
    fn reloading_gives_equal_board() {
        let tables = tables();
        let board = Board::startpos(tables.clone());
        let again = Board::from_fen(tables, &board.to_fen()).unwrap();
        assert_eq!(board, again);
        assert_eq!(board.zobrist_hash(), again.zobrist_hash());
    }

    #[test]
    fn invalid_fen_is_rejected() {
        assert!(matches!(
            Board::from_fen(tables(), "not a fen"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn piece_lookup() {
        let board = Board::startpos(tables());
        assert_eq!(board.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(Square::D8), Some((Piece::Queen, Color::Black)));
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(board.pieces_of(Piece::Pawn, Color::White).count(), 8);
        assert_eq!(board.pieces(Piece::Knight).count(), 4);
        assert_eq!(board.occupied(), board.color(Color::White) | board.color(Color::Black));
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn snapshot_runs_a1_to_h8() {
        let board = Board::startpos(tables());
        let snapshot = board.snapshot();
        assert_eq!(snapshot.len(), 64);
        assert_eq!(&snapshot[0..8], "RNBQKBNR");
        assert_eq!(&snapshot[8..16], "PPPPPPPP");
        assert_eq!(&snapshot[16..48], ".".repeat(32));
        assert_eq!(&snapshot[56..64], "rnbqkbnr");
    }

    #[test]
    fn history_starts_with_initial_hash() {
        let board = Board::startpos(tables());
        assert_eq!(board.hash_history(), &[board.zobrist_hash()]);
    }

    #[test]
    fn castling_rights_fields() {
        let rights = CastlingRights::from_fen("Kq");
        assert!(rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));
        assert_eq!(rights.to_fen(), "Kq");
        assert_eq!(CastlingRights::NONE.to_fen(), "-");
        assert_eq!(CastlingRights::ALL.to_fen(), "KQkq");
    }

    #[test]
    fn touching_start_squares_drops_rights() {
        let mut rights = CastlingRights::ALL;
        rights.touch(Square::H1);
        assert_eq!(rights.to_fen(), "Qkq");
        rights.touch(Square::E8);
        assert_eq!(rights.to_fen(), "Q");
        rights.touch(sq("d4"));
        assert_eq!(rights.to_fen(), "Q");
        rights.touch(Square::A1);
        assert_eq!(rights, CastlingRights::NONE);
    }
}
