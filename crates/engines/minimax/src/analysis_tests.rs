use super::*;
use crate::config::EngineConfig;
use chess_core::legal_moves;

const WAIT: Duration = Duration::from_secs(30);

fn session() -> AnalysisSession {
    AnalysisSession::new(Engine::default())
}

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

#[test]
fn test_new_session_is_idle() {
    let session = session();
    assert_eq!(session.status(), AnalyzerStatus::Idle);
    assert_eq!(session.latest(), None);
}

#[test]
fn test_reports_improve_with_depth() {
    let mut session = session();
    let start = Position::startpos();
    session.start(&start);
    assert!(session.is_running());

    let report = session.wait_for_depth(2, WAIT).unwrap();
    assert!(report.depth >= 2);
    assert!(legal_moves(&start).contains(&report.best_move.unwrap()));
    session.stop_and_join();
}

#[test]
fn test_stop_marks_session_stopped() {
    let mut session = session();
    session.start(&Position::startpos());
    session.wait_for_depth(1, WAIT);
    session.stop_and_join();
    assert_eq!(session.status(), AnalyzerStatus::Stopped);

    // Nothing is published after the stop
    let frozen = session.latest();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(session.latest(), frozen);
}

#[test]
fn test_replacing_position_discards_old_results() {
    let mut session = session();
    session.start(&Position::startpos());
    session.wait_for_depth(1, WAIT);

    let endgame = pos("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    session.start(&endgame);
    let report = session.wait_for_depth(1, WAIT).unwrap();
    assert!(legal_moves(&endgame).contains(&report.best_move.unwrap()));
    session.stop_and_join();
}

#[test]
fn test_position_without_moves_finishes_on_its_own() {
    let mut session = session();
    let stalemate = pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    session.start(&stalemate);
    let report = session.wait_for_depth(u8::MAX, WAIT).unwrap();
    assert_eq!(report.depth, 1);
    assert_eq!(report.best_move, None);
    assert_eq!(report.score, 0);
    assert_eq!(session.status(), AnalyzerStatus::Stopped);
}

#[test]
fn test_deepening_stops_at_max_depth() {
    let config = EngineConfig {
        depth: 1,
        max_depth: 2,
        ..EngineConfig::default()
    };
    let mut session = AnalysisSession::new(Engine::from_config(config).unwrap());
    let start = Position::startpos();
    session.start(&start);
    let report = session.wait_for_depth(u8::MAX, WAIT).unwrap();
    assert_eq!(report.depth, 2);
    assert!(legal_moves(&start).contains(&report.best_move.unwrap()));
    assert_eq!(session.status(), AnalyzerStatus::Stopped);
}

#[test]
fn test_panicking_analyzer_reports_failure_and_keeps_report() {
    let mut session = session();
    session.fail_after = Some(1);
    session.start(&Position::startpos());

    let report = session.wait_for_depth(u8::MAX, WAIT).unwrap();
    assert_eq!(report.depth, 1);
    assert!(report.best_move.is_some());
    match session.status() {
        AnalyzerStatus::Failed(message) => assert!(message.contains("injected analyzer fault")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(session.latest(), Some(report));

    // Stopping a failed session keeps the failure visible
    session.stop_and_join();
    assert!(matches!(session.status(), AnalyzerStatus::Failed(_)));
    assert_eq!(session.latest(), Some(report));
}

#[test]
fn test_finds_mate_in_one() {
    let mut session = session();
    let p = pos("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    session.start(&p);
    let report = session.wait_for_depth(2, WAIT).unwrap();
    assert_eq!(report.best_move.map(|m| m.to_string()).as_deref(), Some("e1e8"));
    session.stop_and_join();
}

#[test]
fn test_panic_message_extraction() {
    let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
    assert_eq!(panic_message(payload.as_ref()), "boom");
    let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
    assert_eq!(panic_message(payload.as_ref()), "bang");
    let payload: Box<dyn std::any::Any + Send> = Box::new(3u8);
    assert_eq!(panic_message(payload.as_ref()), "analyzer panicked");
}
