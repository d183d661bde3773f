//! End-to-end: the engine driving a real game through the rules crate.

use std::sync::Arc;

use chess_core::{Game, GameStatus, Position, SearchLimits};
use minimax_engine::{Engine, EngineConfig, MATE_SCORE, OpeningBook};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn fixed_depth_engine(book: OpeningBook, book_probability: f64) -> Engine {
    let config = EngineConfig {
        depth: 1,
        min_search_time_ms: 0,
        max_depth: 1,
        book_probability,
        ..EngineConfig::default()
    };
    Engine::new(config, Arc::new(book))
}

#[test]
fn self_play_only_makes_legal_moves() {
    let engine = fixed_depth_engine(OpeningBook::new(), 0.0);
    let mut game = Game::default();
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..40 {
        if game.status() != GameStatus::Ongoing {
            break;
        }
        let result = engine.search_with(game.position(), SearchLimits::depth(1), &mut rng);
        let mv = result.best_move.expect("ongoing game has a move");
        game.try_move(mv).expect("engine move is legal");
    }
    assert!(!game.moves().is_empty());
}

#[test]
fn engine_delivers_back_rank_mate() {
    let engine = fixed_depth_engine(OpeningBook::new(), 0.0);
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1").unwrap();
    let result = engine.search(game.position(), SearchLimits::depth(2));
    assert_eq!(result.score, MATE_SCORE + 1);
    game.try_move(result.best_move.unwrap()).unwrap();
    assert_eq!(game.status(), GameStatus::WhiteWins);
}

#[test]
fn built_table_drives_opening_choice() {
    let start = Position::startpos();
    let replies: Vec<Position> = chess_core::legal_moves(&start)
        .into_iter()
        .map(|mv| start.after(mv))
        .collect();
    let book = OpeningBook::build(replies, 1, 10_000);
    assert_eq!(book.len(), 20);

    let json = book.to_json().unwrap();
    let reloaded = OpeningBook::from_json_str(&json).unwrap();

    let engine = fixed_depth_engine(reloaded, 1.0);
    let mut rng = StdRng::seed_from_u64(2024);
    let result = engine.search_with(&start, SearchLimits::depth(1), &mut rng);
    assert!(result.from_book);
    let mut game = Game::default();
    game.try_move(result.best_move.unwrap()).unwrap();
}
