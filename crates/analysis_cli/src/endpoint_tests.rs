use super::*;
use chess_core::{Move, START_FEN};

fn result(best_move: Option<Move>, score: i32) -> SearchResult {
    SearchResult {
        best_move,
        score,
        depth: 3,
        nodes: 100,
        from_book: false,
    }
}

#[test]
fn test_decode_request_fen() {
    let encoded = "rnbqkbnr=pppppppp=8=8=4P3=8=PPPP1PPP=RNBQKBNR%20b%20KQkq%20e3%200%201";
    assert_eq!(
        decode_fen(encoded),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn test_decode_plain_fen_is_unchanged() {
    assert_eq!(decode_fen(START_FEN), START_FEN);
}

#[test]
fn test_response_with_move() {
    // e2e4: files and ranks are 1-based
    let body = response(&result(Some(Move::new(12, 28)), 35));
    assert_eq!(body.to_string(), "[35,[[5,2],[5,4]]]");
}

#[test]
fn test_response_without_move() {
    let body = response(&result(None, -1_000_002));
    assert_eq!(body.to_string(), "[-1000002,null]");
}
