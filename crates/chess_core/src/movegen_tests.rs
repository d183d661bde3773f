use super::*;

fn sqr(c: &str) -> u8 {
    coord_to_sq(c).unwrap()
}

fn has(moves: &[Move], from: &str, to: &str) -> bool {
    moves.iter().any(|m| m.from == sqr(from) && m.to == sqr(to))
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
}

#[test]
fn test_pawn_double_step_needs_both_squares_empty() {
    let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
    let moves = legal_moves_from(&pos, sqr("e2"));
    assert!(moves.is_empty());

    let pos = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
    let moves = legal_moves_from(&pos, sqr("e2"));
    assert_eq!(moves.len(), 1);
    assert!(has(&moves, "e2", "e3"));
}

#[test]
fn test_moved_pawn_has_no_double_step() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    // Same square, but flagged as having moved (e.g. returned via an editor)
    let e2 = sqr("e2");
    let pawn = pos.piece_at(e2).unwrap().mark_moved();
    pos.set_piece(e2, Some(pawn));
    let moves = legal_moves_from(&pos, e2);
    assert_eq!(moves.len(), 1);
}

#[test]
fn test_pawn_diagonal_only_on_enemy_or_en_passant() {
    let pos = Position::from_fen("4k3/8/8/3pPp2/8/8/8/4K3 w - f6 0 2").unwrap();
    let moves = legal_moves_from(&pos, sqr("e5"));
    assert!(has(&moves, "e5", "e6"));
    assert!(has(&moves, "e5", "f6"));
    assert!(!has(&moves, "e5", "d6"));
}

#[test]
fn test_en_passant_after_e4_e5_d5() {
    let mut pos = Position::startpos();
    for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
        pos.make_move(Move::new(sqr(from), sqr(to)));
    }
    let moves = legal_moves(&pos);
    assert!(has(&moves, "e5", "d6"));

    let after = pos.after(Move::new(sqr("e5"), sqr("d6")));
    assert_eq!(after.piece_at(sqr("d5")), None);
    assert_eq!(
        after.piece_at(sqr("d6")).map(|p| (p.kind, p.color)),
        Some((PieceKind::Pawn, Color::White))
    );
}

#[test]
fn test_promotion_generates_all_kinds() {
    let pos = Position::from_fen("3r4/4P3/8/8/8/8/8/k6K w - - 0 1").unwrap();
    let moves = legal_moves_from(&pos, sqr("e7"));
    // e8 push and d8 capture, four kinds each
    assert_eq!(moves.len(), 8);
    for kind in PieceKind::PROMOTIONS {
        assert!(moves.contains(&Move::with_promo(sqr("e7"), sqr("e8"), kind)));
        assert!(moves.contains(&Move::with_promo(sqr("e7"), sqr("d8"), kind)));
    }
}

#[test]
fn test_knight_and_king_respect_own_pieces() {
    let pos = Position::startpos();
    let knight = legal_moves_from(&pos, sqr("g1"));
    assert_eq!(knight.len(), 2);
    assert!(legal_moves_from(&pos, sqr("e1")).is_empty());
}

#[test]
fn test_slider_stops_at_blockers() {
    let pos = Position::from_fen("4k3/8/8/8/1p6/8/8/R3K3 w Q - 0 1").unwrap();
    let moves = legal_moves_from(&pos, sqr("a1"));
    // a2..a8 (7) and b1..d1 (3)
    assert_eq!(moves.len(), 10);
    assert!(!has(&moves, "a1", "e1"));
}

#[test]
fn test_kingside_castling_legal_from_start_setup() {
    let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/5NP1/PPPPPPBP/RNBQK2R w KQkq - 0 1")
        .unwrap();
    let moves = legal_moves(&pos);
    assert!(has(&moves, "e1", "g1"));

    let after = pos.after(Move::new(sqr("e1"), sqr("g1")));
    assert_eq!(after.piece_at(sqr("g1")).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(after.piece_at(sqr("f1")).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(!after.castling.wk && !after.castling.wq);
}

#[test]
fn test_castling_through_attacked_square_rejected() {
    // Black rook on f8 covers f1, the square the king crosses
    let pos = Position::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(!has(&moves, "e1", "g1"));
}

#[test]
fn test_castling_into_and_out_of_check_rejected() {
    // Landing square g1 attacked
    let pos = Position::from_fen("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(!has(&legal_moves(&pos), "e1", "g1"));

    // King currently in check
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(!has(&legal_moves(&pos), "e1", "g1"));
}

#[test]
fn test_queenside_b_file_attack_does_not_block_castling() {
    // b1 is attacked but the king never crosses it
    let pos = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    assert!(has(&legal_moves(&pos), "e1", "c1"));
}

#[test]
fn test_castling_needs_right_and_unmoved_rook() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").unwrap();
    assert!(!has(&legal_moves(&pos), "e1", "g1"));

    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let h1 = sqr("h1");
    let rook = pos.piece_at(h1).unwrap().mark_moved();
    pos.set_piece(h1, Some(rook));
    assert!(!has(&legal_moves(&pos), "e1", "g1"));
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight on e2 pinned by rook on e8
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves_from(&pos, sqr("e2")).is_empty());
}

#[test]
fn test_fools_mate_has_no_moves() {
    let mut pos =
        Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2")
            .unwrap();
    pos.make_move(Move::new(sqr("d8"), sqr("h4")));
    assert!(legal_moves(&pos).is_empty());
    assert!(pos.in_check(Color::White));
}

#[test]
fn test_legal_moves_from_wrong_side_is_empty() {
    let pos = Position::startpos();
    assert!(legal_moves_from(&pos, sqr("e7")).is_empty());
    assert!(legal_moves_from(&pos, sqr("e4")).is_empty());
}

#[test]
fn test_legal_moves_from_off_board_is_empty() {
    let pos = Position::startpos();
    assert!(legal_moves_from(&pos, 64).is_empty());
    assert!(legal_moves_from(&pos, 70).is_empty());
    assert!(legal_moves_from(&pos, u8::MAX).is_empty());
    assert_eq!(pos.piece_at(64), None);
}

#[test]
fn test_missing_king_degrades_to_pseudo_legal() {
    let pos = Position::from_fen("8/8/8/8/8/8/8/R7 w - - 0 1").unwrap();
    assert_eq!(legal_moves(&pos).len(), 14);
}
