//! Search benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example search_bench -p minimax_engine -- [depth] [fen]
//!
//! Examples:
//!   # Default: depth 4 over the built-in positions
//!   cargo flamegraph --example search_bench -p minimax_engine
//!
//!   # One position, deeper
//!   cargo flamegraph --example search_bench -p minimax_engine -- 5 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"

use std::env;
use std::time::{Duration, Instant};

use chess_core::Position;
use minimax_engine::{INFINITY, Searcher};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Italian",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Promotions",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
];

const CACHE_CAPACITY: usize = 200_000;

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    let positions: Vec<(&str, &str)> = match args.get(2) {
        Some(fen) => vec![("Custom", fen.as_str())],
        None => TEST_POSITIONS.to_vec(),
    };

    println!("=== Search Benchmark ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in positions {
        let pos = match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(e) => {
                eprintln!("{name}: {e}");
                continue;
            }
        };
        print!("{name:.<24}");

        let mut searcher = Searcher::new(CACHE_CAPACITY);
        let start = Instant::now();
        let (score, best) = searcher.minimax(&pos, depth, -INFINITY, INFINITY);
        let elapsed = start.elapsed();

        total_nodes += searcher.nodes();
        total_time += elapsed;

        let best = best.map_or_else(|| "-".to_string(), |m| m.to_string());
        let nps = searcher.nodes() as f64 / elapsed.as_secs_f64().max(1e-9);
        println!(
            " {best:<6} {score:>8}  {:>10} nodes in {elapsed:>8.3?} ({nps:>10.0} nps, {} cache hits)",
            searcher.nodes(),
            searcher.cache().hits()
        );
    }

    println!();
    println!("{:=<70}", "");
    let total_nps = total_nodes as f64 / total_time.as_secs_f64().max(1e-9);
    println!("TOTAL: {total_nodes} nodes in {total_time:.3?} ({total_nps:.0} nps)");
}
