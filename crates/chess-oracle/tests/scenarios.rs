//! Whole-game scenarios driven through the engine façade.

use std::sync::{Arc, OnceLock};

use chess_core::{Color, FenParser, Move, Piece, Square};
use chess_oracle::{Board, Engine, EngineError, GameState, Tables};

fn tables() -> Arc<Tables> {
    static TABLES: OnceLock<Arc<Tables>> = OnceLock::new();
    TABLES.get_or_init(|| Arc::new(Tables::seeded(0x5eed))).clone()
}

fn engine(fen: &str) -> Engine {
    Engine::from_fen(tables(), fen).expect("valid FEN")
}

fn play_all(engine: &mut Engine, moves: &[&str]) {
    for mv in moves {
        engine
            .act(mv)
            .unwrap_or_else(|err| panic!("{mv} rejected: {err}"));
    }
}

fn uci(text: &str) -> Move {
    Move::from_uci(text).unwrap()
}

#[test]
fn start_position_round_trips() {
    let board = Board::startpos(tables());
    assert_eq!(board.to_fen(), FenParser::STARTPOS);

    let reloaded = Board::from_fen(tables(), &board.to_fen()).unwrap();
    assert_eq!(reloaded, board);
    assert_eq!(reloaded.snapshot(), board.snapshot());
    assert_eq!(reloaded.zobrist_hash(), board.zobrist_hash());
}

#[test]
fn mid_game_position_round_trips() {
    let mut e = Engine::with_tables(tables());
    play_all(&mut e, &["e2e4", "c7c5", "g1f3", "d7d6", "f1b5", "b8c6"]);
    let fen = e.to_fen();
    let reloaded = Board::from_fen(tables(), &fen).unwrap();
    assert_eq!(&reloaded, e.board());
    assert_eq!(reloaded.to_fen(), fen);
}

#[test]
fn castling_moves_king_and_rook_together() {
    let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";

    let mut e = engine(fen);
    e.act("e1g1").unwrap();
    let board = e.board();
    assert_eq!(board.piece_at(Square::G1), Some((Piece::King, Color::White)));
    assert_eq!(board.piece_at(Square::F1), Some((Piece::Rook, Color::White)));
    assert_eq!(board.piece_at(Square::E1), None);
    assert_eq!(board.piece_at(Square::H1), None);

    let mut e = engine(fen);
    e.act("e1c1").unwrap();
    let board = e.board();
    assert_eq!(board.piece_at(Square::C1), Some((Piece::King, Color::White)));
    assert_eq!(board.piece_at(Square::D1), Some((Piece::Rook, Color::White)));
    assert_eq!(board.piece_at(Square::A1), None);
    assert_eq!(board.piece_at(Square::E1), None);
    assert_eq!(board.castling_rights().to_fen(), "kq");
}

#[test]
fn castling_is_refused_through_attacked_squares() {
    // rook on f8 covers f1
    let e = engine("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1");
    assert!(!e.is_legal_move(uci("e1g1")));
    assert!(e.is_legal_move(uci("e1c1")));

    // b1 only has to be empty
    let e = engine("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(e.is_legal_move(uci("e1c1")));
    assert!(e.is_legal_move(uci("e1g1")));

    // no castling out of check
    let e = engine("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(e.is_check());
    assert!(!e.is_legal_move(uci("e1g1")));
    assert!(!e.is_legal_move(uci("e1c1")));

    // a blocked path
    let e = engine("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
    assert!(!e.is_legal_move(uci("e1g1")));
    assert!(!e.is_legal_move(uci("e1c1")));
}

#[test]
fn castling_rights_are_never_regained() {
    let mut e = engine("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play_all(&mut e, &["h1h2", "a8a7", "h2h1", "a7a8"]);
    assert_eq!(e.board().castling_rights().to_fen(), "Qk");
    assert!(!e.is_legal_move(uci("e1g1")));
    assert!(e.is_legal_move(uci("e1c1")));
}

#[test]
fn back_rank_mate() {
    let mut e = engine("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1");
    e.act("d1d8").unwrap();
    assert_eq!(e.game_state(), GameState::WhiteWin);
    assert_eq!(e.status(), "checkmate");
    assert!(e.is_check());
    assert!(e.legal_moves().is_empty());
}

#[test]
fn fools_mate() {
    let mut e = Engine::with_tables(tables());
    play_all(&mut e, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(e.game_state(), GameState::BlackWin);
    assert_eq!(e.status(), "checkmate");
    assert!(matches!(e.act("e1f2"), Err(EngineError::GameOver(GameState::BlackWin))));
}

#[test]
fn queen_check_on_g7_is_answered_by_capture() {
    let mut e = engine("6k1/5ppp/8/8/8/8/6Q1/6K1 w - - 0 1");
    e.act("g2g7").unwrap();
    assert!(e.is_check());
    assert_eq!(e.status(), "playing");
    let replies: Vec<String> = e.legal_moves().iter().map(|mv| mv.to_uci()).collect();
    assert_eq!(replies, ["g8g7"]);
}

#[test]
fn stalemate_is_a_draw_not_a_mate() {
    let e = engine("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!e.is_check());
    assert!(e.legal_moves().is_empty());
    assert_eq!(e.game_state(), GameState::Draw);
    assert_eq!(e.status(), "draw");

    let mut e = engine("7k/8/4Q1K1/8/8/8/8/8 w - - 0 1");
    assert_eq!(e.status(), "playing");
    e.act("e6f7").unwrap();
    assert_eq!(e.status(), "draw");
    assert!(!e.is_check());
}

#[test]
fn threefold_repetition_draws_on_third_occurrence() {
    let mut e = engine("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let shuffle = ["e1e2", "e8e7", "e2e1", "e7e8"];
    for (ply, mv) in shuffle.iter().chain(shuffle.iter()).enumerate() {
        assert_eq!(e.status(), "playing", "before ply {}", ply + 1);
        e.act(mv).unwrap();
    }
    assert_eq!(e.game_state(), GameState::Draw);
    assert_eq!(e.board().repetition_count(), 2);
}

#[test]
fn insufficient_material() {
    assert_eq!(engine("4k3/8/8/8/8/8/8/4K3 w - - 0 1").status(), "draw");
    assert_eq!(engine("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").status(), "draw");
    assert_eq!(engine("4k3/8/8/8/8/8/8/2B1K3 b - - 0 1").status(), "draw");
    assert_eq!(engine("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1").status(), "playing");

    let mut e = engine("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
    assert!(e.is_check());
    assert_eq!(e.status(), "playing");
    e.act("e1e2").unwrap();
    assert_eq!(e.status(), "draw");
}

/// White shuffles a rook then walks the king; Black shuffles a knight.
/// No pawn moves, no captures and no position repeats.
fn fifty_move_walk() -> Vec<String> {
    let mut path = vec!["g1".to_string()];
    path.extend("fedcba".chars().map(|file| format!("{file}1")));
    for rank in 2..=6 {
        let files = if rank % 2 == 0 { "abcdefgh" } else { "hgfedcba" };
        path.extend(files.chars().map(|file| format!("{file}{rank}")));
    }

    let mut white: Vec<String> = path.windows(2).map(|w| format!("{}{}", w[0], w[1])).collect();
    white.extend(["h1g1", "g1f1", "f1e1", "e1d1"].map(String::from));
    assert_eq!(white.len(), 50);

    white
        .into_iter()
        .enumerate()
        .flat_map(|(i, mv)| {
            let reply = if i % 2 == 0 { "a8c7" } else { "c7a8" };
            [mv, reply.to_string()]
        })
        .collect()
}

#[test]
fn fifty_move_rule_triggers_at_hundredth_ply() {
    let mut e = engine("n5bk/6pp/8/8/8/8/8/6RK w - - 0 1");
    let moves = fifty_move_walk();
    assert_eq!(moves.len(), 100);

    for (i, mv) in moves.iter().enumerate() {
        e.act(mv)
            .unwrap_or_else(|err| panic!("ply {} {mv} rejected: {err}", i + 1));
        let ply = i as u32 + 1;
        assert_eq!(e.board().halfmove_clock(), ply);
        if ply < 100 {
            assert_eq!(e.status(), "playing", "after ply {ply}");
        }
    }

    assert_eq!(e.game_state(), GameState::Draw);
    assert_eq!(e.board().repetition_count(), 0);
}

#[test]
fn pawn_move_resets_the_clock() {
    let mut e = engine("4k3/8/8/8/8/8/4P3/R3K3 w - - 99 60");
    e.act("e2e3").unwrap();
    assert_eq!(e.board().halfmove_clock(), 0);
    assert_eq!(e.status(), "playing");

    let mut e = engine("4k3/8/8/8/8/8/4P3/R3K3 w - - 99 60");
    e.act("a1a2").unwrap();
    assert_eq!(e.status(), "draw");
}

#[test]
fn en_passant_capture_through_the_engine() {
    let mut e = Engine::with_tables(tables());
    play_all(&mut e, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(e.board().en_passant(), Some(Square::from_algebraic("d6").unwrap()));
    e.act("e5d6").unwrap();
    assert_eq!(e.board().piece_at(Square::from_algebraic("d5").unwrap()), None);
    assert_eq!(e.board().occupied().count(), 31);

    // the right lapses after one ply
    let mut e = Engine::with_tables(tables());
    play_all(&mut e, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert!(matches!(e.act("e5d6"), Err(EngineError::IllegalMove(_))));
}

#[test]
fn pinned_piece_cannot_move() {
    let e = engine("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
    let bishop = Square::from_algebraic("e2").unwrap();
    assert!(e.board().generate_moves(bishop).is_not_empty());
    assert!(e.board().generate_legal_moves(bishop).is_empty());
    assert!(!e.is_legal_move(uci("e2d3")));
}

#[test]
fn independent_games_share_tables() {
    let shared = tables();
    let mut a = Engine::with_tables(shared.clone());
    let mut b = Engine::with_tables(shared.clone());
    a.act("e2e4").unwrap();
    b.act("d2d4").unwrap();
    assert_ne!(a.to_fen(), b.to_fen());
    assert!(Arc::ptr_eq(a.tables(), b.tables()));
    assert_eq!(Engine::with_tables(shared).board().zobrist_hash(), a.board().hash_history()[0]);
}
