//! Background analysis of the live position.
//!
//! One analyzer thread per session searches a frozen copy of the position at
//! increasing depth, up to the engine's `max_depth`, and publishes
//! `(depth, score, best_move)` after every completed round. Starting a new analysis stops the previous one; the old
//! thread finishes its current round and exits without publishing. Stopping
//! is cooperative and only checked between rounds.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chess_core::{Move, Position, StopSignal};
use tracing::{debug, error, info};

use crate::engine::Engine;
use crate::search::INFINITY;

/// Latest completed analysis round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisReport {
    pub depth: u8,
    pub score: i32,
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerStatus {
    Idle,
    Running,
    Stopped,
    /// The analyzer thread panicked; the message is the panic payload
    Failed(String),
}

#[derive(Debug)]
struct State {
    /// Bumped on every start and stop; a thread may only publish while its
    /// own generation is current.
    generation: u64,
    report: Option<AnalysisReport>,
    status: AnalyzerStatus,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<State>,
    published: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Worker {
    stop: StopSignal,
    handle: JoinHandle<()>,
}

/// Owns at most one running analyzer.
pub struct AnalysisSession {
    engine: Engine,
    shared: Arc<Shared>,
    worker: Option<Worker>,
    /// Panic right after publishing this depth
    #[cfg(test)]
    fail_after: Option<u8>,
}

impl AnalysisSession {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    generation: 0,
                    report: None,
                    status: AnalyzerStatus::Idle,
                }),
                published: Condvar::new(),
            }),
            worker: None,
            #[cfg(test)]
            fail_after: None,
        }
    }

    /// Analyze `pos`, replacing any running analysis.
    pub fn start(&mut self, pos: &Position) {
        self.stop();
        let generation = {
            let mut state = self.shared.lock();
            state.generation += 1;
            state.report = None;
            state.status = AnalyzerStatus::Running;
            state.generation
        };

        let stop = StopSignal::new();
        let ctx = AnalyzerContext {
            pos: pos.clone(),
            engine: self.engine.clone(),
            stop: stop.clone(),
            shared: Arc::clone(&self.shared),
            generation,
            #[cfg(test)]
            fail_after: self.fail_after,
        };
        info!(fen = %pos.to_fen(), generation, "analysis started");
        let handle = thread::spawn(move || ctx.run());
        self.worker = Some(Worker { stop, handle });
    }

    /// Signal the running analyzer to stop. Does not wait for it; its
    /// pending round is discarded.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.retire(&worker.stop);
        }
    }

    /// Stop and wait for the analyzer thread to exit.
    pub fn stop_and_join(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.retire(&worker.stop);
            // Panics are caught inside the thread
            let _ = worker.handle.join();
        }
    }

    fn retire(&self, stop: &StopSignal) {
        stop.stop();
        let mut state = self.shared.lock();
        state.generation += 1;
        if state.status == AnalyzerStatus::Running {
            state.status = AnalyzerStatus::Stopped;
        }
        drop(state);
        self.shared.published.notify_all();
        info!("analysis stopped");
    }

    pub fn latest(&self) -> Option<AnalysisReport> {
        self.shared.lock().report
    }

    pub fn status(&self) -> AnalyzerStatus {
        self.shared.lock().status.clone()
    }

    pub fn is_running(&self) -> bool {
        self.status() == AnalyzerStatus::Running
    }

    /// Block until the current analysis has published a round of at least
    /// `depth`, the analyzer stops, or `timeout` passes. Returns the latest
    /// report either way.
    pub fn wait_for_depth(&self, depth: u8, timeout: Duration) -> Option<AnalysisReport> {
        let state = self.shared.lock();
        let (state, _) = self
            .shared
            .published
            .wait_timeout_while(state, timeout, |s| {
                s.status == AnalyzerStatus::Running && s.report.is_none_or(|r| r.depth < depth)
            })
            .unwrap_or_else(PoisonError::into_inner);
        state.report
    }
}

impl Drop for AnalysisSession {
    fn drop(&mut self) {
        self.stop();
    }
}

struct AnalyzerContext {
    pos: Position,
    engine: Engine,
    stop: StopSignal,
    shared: Arc<Shared>,
    generation: u64,
    #[cfg(test)]
    fail_after: Option<u8>,
}

impl AnalyzerContext {
    fn run(self) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.deepen()));
        let mut state = self.shared.lock();
        if state.generation != self.generation {
            return;
        }
        state.status = match outcome {
            Ok(()) => AnalyzerStatus::Stopped,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(generation = self.generation, %message, "analyzer failed");
                AnalyzerStatus::Failed(message)
            }
        };
        drop(state);
        self.shared.published.notify_all();
    }

    fn deepen(&self) {
        let mut searcher = self.engine.searcher();
        let max_depth = self.engine.config().max_depth.max(1);
        let mut depth = 1u8;
        while !self.stop.is_stopped() {
            let (score, best_move) = searcher.minimax(&self.pos, depth, -INFINITY, INFINITY);
            let report = AnalysisReport {
                depth,
                score,
                best_move,
            };
            if !self.publish(report) {
                return;
            }
            debug!(depth, score, nodes = searcher.nodes(), "analysis round complete");
            #[cfg(test)]
            if self.fail_after == Some(depth) {
                panic!("injected analyzer fault at depth {depth}");
            }
            // No legal move: deeper rounds cannot change anything
            if best_move.is_none() || depth >= max_depth {
                return;
            }
            depth += 1;
        }
    }

    /// Returns false once this analyzer has been superseded.
    fn publish(&self, report: AnalysisReport) -> bool {
        let mut state = self.shared.lock();
        if state.generation != self.generation {
            return false;
        }
        state.report = Some(report);
        drop(state);
        self.shared.published.notify_all();
        true
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "analyzer panicked".to_string()
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod analysis_tests;
