//! Wire format of the remote analysis endpoint.
//!
//! Requests carry a FEN with `/` written as `=` and spaces as `%20`. The
//! response is `[value, [[from_file, from_rank], [to_file, to_rank]]]` with
//! 1-based coordinates, or `[value, null]` when there is no legal move.

use chess_core::to_file_rank;
use minimax_engine::SearchResult;
use serde_json::{Value, json};

pub fn decode_fen(encoded: &str) -> String {
    encoded.replace('=', "/").replace("%20", " ")
}

pub fn response(result: &SearchResult) -> Value {
    let mv = result.best_move.map(|mv| {
        let (ff, fr) = to_file_rank(mv.from);
        let (tf, tr) = to_file_rank(mv.to);
        json!([[ff, fr], [tf, tr]])
    });
    json!([result.score, mv])
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod endpoint_tests;
