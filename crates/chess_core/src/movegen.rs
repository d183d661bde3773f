//! Pseudo-legal move generation and the check-safety filter on top of it.
//!
//! Generation never looks at king safety. Legality is decided by applying a
//! candidate to a copy of the position and asking whether the mover's king can
//! be captured on the resulting board.

use crate::board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

/// All legal moves for the side to move.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Legal moves for the side to move, written into a reusable buffer.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);
    out.retain(|&mv| is_legal(pos, mv));
}

/// Legal moves starting on `from`. Empty if the square is empty, off the
/// board, or holds a piece of the side not to move.
pub fn legal_moves_from(pos: &Position, from: u8) -> Vec<Move> {
    let mut out = Vec::new();
    if from >= 64 {
        return out;
    }
    match pos.piece_at(from) {
        Some(pc) if pc.color == pos.side_to_move => pseudo_moves_from(pos, from, &mut out),
        _ => return out,
    }
    out.retain(|&mv| is_legal(pos, mv));
    out
}

/// Check-safety filter for a pseudo-legal move.
///
/// Castling also requires the king's start square and the square it crosses
/// to be unattacked; the landing square is covered by the general rule.
pub fn is_legal(pos: &Position, mv: Move) -> bool {
    let Some(pc) = pos.piece_at(mv.from) else {
        return false;
    };
    let enemy = pc.color.other();

    if pc.kind == PieceKind::King && (file_of(mv.to) - file_of(mv.from)).abs() == 2 {
        let step = (file_of(mv.to) - file_of(mv.from)).signum();
        let crossed = sq(file_of(mv.from) + step, rank_of(mv.from));
        if pos.is_square_attacked(mv.from, enemy)
            || crossed.is_none_or(|s| pos.is_square_attacked(s, enemy))
        {
            return false;
        }
    }

    !pos.after(mv).in_check(pc.color)
}

/// Pseudo-legal moves for every piece of the side to move.
pub fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for from in 0..64u8 {
        if pos
            .piece_at(from)
            .is_some_and(|pc| pc.color == pos.side_to_move)
        {
            pseudo_moves_from(pos, from, out);
        }
    }
}

/// Pseudo-legal moves of the piece on `from`, whatever its color.
pub fn pseudo_moves_from(pos: &Position, from: u8, out: &mut Vec<Move>) {
    let Some(pc) = pos.piece_at(from) else {
        return;
    };
    match pc.kind {
        PieceKind::Pawn => pawn_moves(pos, from, pc, out),
        PieceKind::Knight => leaper_moves(pos, from, pc.color, &KNIGHT_DELTAS, out),
        PieceKind::Bishop => slider_moves(pos, from, pc.color, &DIAGONALS, out),
        PieceKind::Rook => slider_moves(pos, from, pc.color, &ORTHOGONALS, out),
        PieceKind::Queen => {
            slider_moves(pos, from, pc.color, &DIAGONALS, out);
            slider_moves(pos, from, pc.color, &ORTHOGONALS, out);
        }
        PieceKind::King => {
            leaper_moves(pos, from, pc.color, &KING_DELTAS, out);
            castle_candidates(pos, from, pc, out);
        }
    }
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move::with_promo(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn pawn_moves(pos: &Position, from: u8, pc: Piece, out: &mut Vec<Move>) {
    let c = pc.color;
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.forward();
    let start_rank = c.home_rank() + dir;
    let promo_rank = c.other().home_rank();

    if let Some(to) = sq(f, r + dir) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(from, to, promo_rank, out);

            if !pc.has_moved() && r == start_rank {
                if let Some(to2) = sq(f, r + 2 * dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, promo_rank, out),
            None if pos.en_passant == Some(to) => out.push(Move::new(from, to)),
            _ => {}
        }
    }
}

fn leaper_moves(pos: &Position, from: u8, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn slider_moves(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

/// Castling candidates: unmoved king, right still held, unmoved rook of the
/// same color on its corner and nothing in between. Attacked squares are the
/// legality filter's concern.
fn castle_candidates(pos: &Position, from: u8, king: Piece, out: &mut Vec<Move>) {
    if king.has_moved() {
        return;
    }
    let c = king.color;
    let rank = c.home_rank();
    if sq(4, rank) != Some(from) {
        return;
    }

    // (right held, corner file, files strictly between, king destination file)
    let sides: [(bool, i8, &[i8], i8); 2] = [
        (pos.castling.kingside(c), 7, &[5, 6], 6),
        (pos.castling.queenside(c), 0, &[1, 2, 3], 2),
    ];
    for (right, corner_file, between, dest_file) in sides {
        if !right {
            continue;
        }
        let rook_ok = sq(corner_file, rank)
            .and_then(|s| pos.piece_at(s))
            .is_some_and(|rook| rook.kind == PieceKind::Rook && rook.color == c && !rook.has_moved());
        let clear = between
            .iter()
            .all(|&f| sq(f, rank).is_some_and(|s| pos.piece_at(s).is_none()));
        if rook_ok && clear {
            if let Some(to) = sq(dest_file, rank) {
                out.push(Move::new(from, to));
            }
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
