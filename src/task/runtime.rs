// src/task/runtime.rs

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Deferred-execution capability consumed by the batch engine.
///
/// A turn completes only after the current synchronous work and every
/// already-ready task have had a chance to run, so batches interleave with
/// other scheduled work instead of starving it.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Parks the caller until the host grants it the next turn.
    async fn yield_turn(&self);
}

/// Production scheduler backed by the Tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn yield_turn(&self) {
        tokio::task::yield_now().await;
    }
}

/// Monotonic time source consumed by the milliseconds budget.
pub trait Clock: Send + Sync {
    /// Monotonic reading since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Production clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
