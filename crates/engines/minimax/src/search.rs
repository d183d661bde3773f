//! Minimax search with alpha-beta pruning.
//!
//! Scores are always from White's point of view: White maximizes, Black
//! minimizes. Captures found with one ply left are searched one ply further
//! so the horizon never falls in the middle of an exchange.

use std::cmp::Reverse;

use chess_core::{Color, Move, Position, legal_moves};

use crate::eval::{EvalCache, MATE_SCORE, piece_value};

/// Wider than any reachable score, mate scores included.
pub const INFINITY: i32 = 1_000_000_000;

/// Ordering key for a move: `value(captured) - value(mover)` for captures,
/// 0 for quiet moves. Higher keys are searched first.
pub fn ordering_key(pos: &Position, mv: Move) -> i32 {
    let Some(captured) = pos.captured_by(mv) else {
        return 0;
    };
    let mover = pos
        .piece_at(mv.from)
        .map_or(0, |pc| piece_value(pc.kind));
    piece_value(captured.kind) - mover
}

/// Legal moves, best ordering key first. Ties keep generation order.
pub fn ordered_moves(pos: &Position) -> Vec<Move> {
    let mut moves = legal_moves(pos);
    moves.sort_by_cached_key(|&mv| Reverse(ordering_key(pos, mv)));
    moves
}

/// Score of a position with no legal moves for the side to move.
fn terminal_score(pos: &Position, depth: u8) -> i32 {
    if !pos.in_check(pos.side_to_move) {
        return 0;
    }
    let mate = MATE_SCORE + depth as i32;
    match pos.side_to_move {
        Color::White => -mate,
        Color::Black => mate,
    }
}

/// One search context. Owns its evaluation cache and node counter, so
/// concurrent searches each use their own `Searcher`.
#[derive(Debug, Clone)]
pub struct Searcher {
    cache: EvalCache,
    nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Searcher {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: EvalCache::new(cache_capacity),
            nodes: 0,
        }
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn cache(&self) -> &EvalCache {
        &self.cache
    }

    /// Search `pos` to `depth` plies within the window `(alpha, beta)`.
    ///
    /// Returns the score and the best move at this node, `None` at leaves
    /// and in positions without legal moves. With the full window
    /// `(-INFINITY, INFINITY)` the score equals plain minimax.
    pub fn minimax(
        &mut self,
        pos: &Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;

        let kings_present =
            pos.king_sq(Color::White).is_some() && pos.king_sq(Color::Black).is_some();
        if depth == 0 || !kings_present {
            return (self.cache.evaluate(pos, depth), None);
        }

        let moves = ordered_moves(pos);
        if moves.is_empty() {
            return (terminal_score(pos, depth), None);
        }

        let maximizing = pos.side_to_move == Color::White;
        let pieces = pos.piece_count();
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move = None;

        for mv in moves {
            let child = pos.after(mv);
            let capture = child.piece_count() < pieces;
            let child_depth = if depth == 1 && capture { 1 } else { depth - 1 };
            let (score, _) = self.minimax(&child, child_depth, alpha, beta);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }
            if beta <= alpha {
                break;
            }
        }

        (best_score, best_move)
    }
}

/// Full-window search with a fresh, uncached [`Searcher`].
pub fn minimax(pos: &Position, depth: u8) -> (i32, Option<Move>) {
    Searcher::default().minimax(pos, depth, -INFINITY, INFINITY)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
