use super::*;
use std::thread;

#[test]
fn test_search_limits_depth_only() {
    let limits = SearchLimits::depth(5);
    assert_eq!(limits.depth, 5);
    assert_eq!(limits.max_depth, 5);
    assert!(!limits.should_deepen(Instant::now(), 5));
}

#[test]
fn test_deepens_until_min_time() {
    let limits = SearchLimits::with_min_time(2, Duration::from_millis(50), 6);
    let started = Instant::now();
    assert!(limits.should_deepen(started, 2));

    thread::sleep(Duration::from_millis(60));
    assert!(!limits.should_deepen(started, 2));
}

#[test]
fn test_max_depth_caps_deepening() {
    let limits = SearchLimits::with_min_time(2, Duration::from_secs(60), 4);
    let started = Instant::now();
    assert!(limits.should_deepen(started, 3));
    assert!(!limits.should_deepen(started, 4));
}

#[test]
fn test_max_depth_never_below_depth() {
    let limits = SearchLimits::with_min_time(5, Duration::ZERO, 2);
    assert_eq!(limits.max_depth, 5);
}

#[test]
fn test_stop_signal_shared_between_clones() {
    let signal = StopSignal::new();
    let remote = signal.clone();
    assert!(!signal.is_stopped());

    let handle = thread::spawn(move || remote.stop());
    handle.join().unwrap();
    assert!(signal.is_stopped());
}
