use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Counts the leaf nodes of the legal move tree below `pos` at `depth`.
/// Every branch works on its own copy of the position.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    fn inner(pos: &Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let Some((buf, rest)) = layers.split_first_mut() else {
            return 0;
        };
        legal_moves_into(pos, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            nodes += inner(&pos.after(mv), depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Per-move node counts at the root, sorted by move text.
pub fn perft_divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    let mut out: Vec<(Move, u64)> = moves
        .into_iter()
        .map(|mv| (mv, perft(&pos.after(mv), depth.saturating_sub(1))))
        .collect();
    out.sort_by_key(|(mv, _)| mv.to_string());
    out
}
