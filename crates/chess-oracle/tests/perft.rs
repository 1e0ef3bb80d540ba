//! Perft node counts on reference positions.

use std::sync::Arc;

use chess_oracle::{perft, perft_divide, Board, Tables};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const PROMOTIONS: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const TALKCHESS: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

fn board(fen: &str) -> Board {
    Board::from_fen(Arc::new(Tables::seeded(3)), fen).unwrap()
}

#[test]
fn start_position() {
    let b = Board::startpos(Arc::new(Tables::seeded(3)));
    assert_eq!(perft(&b, 1), 20);
    assert_eq!(perft(&b, 2), 400);
    assert_eq!(perft(&b, 3), 8_902);
}

#[test]
fn kiwipete() {
    let b = board(KIWIPETE);
    assert_eq!(perft(&b, 1), 48);
    assert_eq!(perft(&b, 2), 2_039);
}

#[test]
fn rook_endgame_with_en_passant_pins() {
    let b = board(ENDGAME);
    assert_eq!(perft(&b, 1), 14);
    assert_eq!(perft(&b, 2), 191);
    assert_eq!(perft(&b, 3), 2_812);
}

#[test]
fn promotions_out_of_check() {
    let b = board(PROMOTIONS);
    assert_eq!(perft(&b, 1), 6);
    assert_eq!(perft(&b, 2), 264);
}

#[test]
fn underpromotion_and_castling_position() {
    let b = board(TALKCHESS);
    assert_eq!(perft(&b, 1), 44);
    assert_eq!(perft(&b, 2), 1_486);
}

#[test]
fn divide_matches_total() {
    let b = board(KIWIPETE);
    let divide = perft_divide(&b, 2);
    assert_eq!(divide.len(), 48);
    assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 2_039);
    assert!(divide.iter().any(|(mv, _)| mv.to_uci() == "e1g1"));
    assert!(divide.iter().any(|(mv, _)| mv.to_uci() == "e1c1"));
}
