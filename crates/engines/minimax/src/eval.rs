//! Static evaluation: material, piece-square tables, phase-dependent king
//! placement, castling rights and a pawn-count term.
//!
//! Scores are centipawns from White's point of view. Evaluation is a pure
//! function of the board and the remaining depth; the game phase is computed
//! per call and passed down, never stored in shared tables.

use std::collections::HashMap;

use chess_core::{Color, PieceKind, Position, file_of, rank_of};

/// Base of the score returned when a king has been captured.
pub const MATE_SCORE: i32 = 1_000_000;
pub const CASTLING_RIGHT_BONUS: i32 = 40;
pub const PAWN_COUNT_WEIGHT: i32 = 5;
/// At or below this many non-king pieces the endgame king table applies.
pub const ENDGAME_PIECE_LIMIT: usize = 12;

/// Material value in centipawns. The king's value only matters for move
/// ordering; it is never counted as material.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Middlegame,
    Endgame,
}

impl Phase {
    pub fn of(pos: &Position) -> Phase {
        let non_kings = pos
            .board
            .iter()
            .flatten()
            .filter(|pc| pc.kind != PieceKind::King)
            .count();
        if non_kings <= ENDGAME_PIECE_LIMIT {
            Phase::Endgame
        } else {
            Phase::Middlegame
        }
    }
}

type Table = [[i32; 8]; 8];

// Row 0 is the far (eighth) rank from the owner's side, row 7 its back rank.
const PAWN_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

const QUEEN_TABLE: Table = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

// Opening and middlegame: stay in the castled corner.
const KING_MIDDLEGAME_TABLE: Table = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

// Endgame: walk to the centre.
const KING_ENDGAME_TABLE: Table = [
    [-50, -40, -30, -20, -20, -30, -40, -50],
    [-30, -20, -10, 0, 0, -10, -20, -30],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-30, -10, 30, 40, 40, 30, -10, -30],
    [-30, -10, 30, 40, 40, 30, -10, -30],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-30, -30, 0, 0, 0, 0, -30, -30],
    [-50, -30, -30, -30, -30, -30, -30, -50],
];

fn table(kind: PieceKind, phase: Phase) -> &'static Table {
    match (kind, phase) {
        (PieceKind::Pawn, _) => &PAWN_TABLE,
        (PieceKind::Knight, _) => &KNIGHT_TABLE,
        (PieceKind::Bishop, _) => &BISHOP_TABLE,
        (PieceKind::Rook, _) => &ROOK_TABLE,
        (PieceKind::Queen, _) => &QUEEN_TABLE,
        (PieceKind::King, Phase::Middlegame) => &KING_MIDDLEGAME_TABLE,
        (PieceKind::King, Phase::Endgame) => &KING_ENDGAME_TABLE,
    }
}

/// Piece-square bonus for a `color` piece of `kind` on `sq`, seen from its
/// own side of the board.
pub fn square_bonus(kind: PieceKind, color: Color, sq: u8, phase: Phase) -> i32 {
    let row = match color {
        Color::White => 7 - rank_of(sq),
        Color::Black => rank_of(sq),
    };
    table(kind, phase)[row as usize][file_of(sq) as usize]
}

/// Evaluate `pos` with `depth` plies of search remaining.
///
/// A missing king is a terminal result, `∓(MATE_SCORE + depth)`, so that a
/// mate found with more depth left (sooner) outranks a later one. A board
/// with no kings at all is scored normally.
pub fn evaluate(pos: &Position, depth: u8) -> i32 {
    let white_king = pos.king_sq(Color::White).is_some();
    let black_king = pos.king_sq(Color::Black).is_some();
    match (white_king, black_king) {
        (false, true) => return -(MATE_SCORE + depth as i32),
        (true, false) => return MATE_SCORE + depth as i32,
        _ => {}
    }

    let phase = Phase::of(pos);
    let mut score = 0i32;
    for sq in 0..64u8 {
        let Some(pc) = pos.piece_at(sq) else {
            continue;
        };
        let material = if pc.kind == PieceKind::King {
            0
        } else {
            piece_value(pc.kind)
        };
        let v = material + square_bonus(pc.kind, pc.color, sq, phase);
        score += if pc.color == Color::White { v } else { -v };
    }

    score += CASTLING_RIGHT_BONUS * (pos.castling.count(Color::White) - pos.castling.count(Color::Black));

    let white_pawns = pos.count(Color::White, PieceKind::Pawn);
    let black_pawns = pos.count(Color::Black, PieceKind::Pawn);
    score += PAWN_COUNT_WEIGHT * (white_pawns * white_pawns - black_pawns * black_pawns);

    score
}

/// Memo table for [`evaluate`], keyed by (Zobrist hash, depth).
///
/// Owned by one searcher; it is never shared between threads. When it
/// reaches capacity it is cleared rather than evicting piecemeal.
#[derive(Debug, Clone, Default)]
pub struct EvalCache {
    entries: HashMap<(u64, u8), i32>,
    capacity: usize,
    hits: u64,
}

impl EvalCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            hits: 0,
        }
    }

    pub fn evaluate(&mut self, pos: &Position, depth: u8) -> i32 {
        if self.capacity == 0 {
            return evaluate(pos, depth);
        }
        let key = (pos.position_hash(), depth);
        if let Some(&score) = self.entries.get(&key) {
            self.hits += 1;
            return score;
        }
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        let score = evaluate(pos, depth);
        self.entries.insert(key, score);
        score
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
