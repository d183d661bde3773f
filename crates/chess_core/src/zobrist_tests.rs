use super::*;
use crate::types::{Color, PieceKind};

#[test]
fn test_zobrist_keys_unique() {
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for piece in 0..6 {
            for sq in 0..64 {
                assert!(
                    seen.insert(ZOBRIST.pieces[color][piece][sq]),
                    "Duplicate Zobrist key found"
                );
            }
        }
    }
    assert!(seen.insert(ZOBRIST.side_to_move), "Side to move key collision");
    for key in ZOBRIST.castling {
        assert!(seen.insert(key), "Castling key collision");
    }
    for key in ZOBRIST.en_passant {
        assert!(seen.insert(key), "En passant key collision");
    }
}

#[test]
fn test_moved_flag_does_not_change_key() {
    let fresh = Piece::new(PieceKind::Rook, Color::White);
    assert_eq!(
        ZOBRIST.piece_key(fresh, 0),
        ZOBRIST.piece_key(fresh.mark_moved(), 0)
    );
    assert_ne!(ZOBRIST.piece_key(fresh, 0), ZOBRIST.piece_key(fresh, 1));
}
