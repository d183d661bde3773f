//! Search limits and the cooperative stop signal.
//!
//! A search at a fixed depth is never interrupted. Limits only decide whether
//! another, deeper round is started once the current one has finished.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Limits for an iterative-deepening search.
///
/// The search starts at `depth` and keeps deepening while the elapsed time is
/// still below `min_time`, never going past `max_depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// First depth searched, in plies
    pub depth: u8,
    /// Minimum wall-clock effort before a result is returned
    pub min_time: Duration,
    /// Hard ceiling for deepening
    pub max_depth: u8,
}

impl SearchLimits {
    /// A single search at exactly `depth`.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            min_time: Duration::ZERO,
            max_depth: depth,
        }
    }

    /// Start at `depth`, deepen until `min_time` has passed or `max_depth`
    /// is reached.
    pub fn with_min_time(depth: u8, min_time: Duration, max_depth: u8) -> Self {
        Self {
            depth,
            min_time,
            max_depth: max_depth.max(depth),
        }
    }

    /// Whether another round deeper than `completed_depth` should run.
    pub fn should_deepen(&self, started: Instant, completed_depth: u8) -> bool {
        completed_depth < self.max_depth && started.elapsed() < self.min_time
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(3)
    }
}

/// Shared stop flag, cheap to clone and safe to poll from another thread.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
