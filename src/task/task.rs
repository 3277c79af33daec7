use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::config::{Budget, Config};
use super::processor::Processor;
use super::runtime::{Clock, Scheduler, SystemClock, TokioScheduler};
use super::types::TaskError;

const RUNNING: u8 = 0;
const CANCELED: u8 = 1;
const COMPLETED: u8 = 2;

struct Shared<T> {
    values: Vec<T>,
    processor: Arc<dyn Processor<T>>,
    budget: Budget,
    name: Option<String>,
    status: AtomicU8,
    cursor: AtomicUsize,
    cancel: CancellationToken,
    done: CancellationToken,
}

impl<T> Shared<T> {
    fn status(&self) -> u8 {
        self.status.load(Ordering::Acquire)
    }

    /// One-way transition out of `Running`. Exactly one caller ever wins;
    /// the winner fires the completion latch.
    fn finish(&self, terminal: u8) -> bool {
        let won = self
            .status
            .compare_exchange(RUNNING, terminal, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.done.cancel();
        }
        won
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("batch-task")
    }
}

/// A cooperative batch-processing task.
///
/// Applies a [`Processor`] to each element of a fixed sequence in strict
/// index order, slicing the work into batches per the configured [`Budget`]
/// and yielding control back to the scheduler between batches. Construction
/// spawns the driving future immediately, but no element is processed before
/// the scheduler has granted at least one turn.
///
/// The handle is cheap to clone; every clone observes the same task.
pub struct BatchTask<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for BatchTask<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> BatchTask<T>
where
    T: Send + Sync + 'static,
{
    /// Spawns a task over `values` using the Tokio scheduler and the system
    /// clock.
    pub fn new<P>(values: Vec<T>, processor: P, config: Config) -> Self
    where
        P: Processor<T> + 'static,
    {
        Self::from_arc(values, Arc::new(processor), config)
    }

    /// Like [`BatchTask::new`], for a processor that is already shared.
    pub fn from_arc(values: Vec<T>, processor: Arc<dyn Processor<T>>, config: Config) -> Self {
        Self::spawn(values, processor, config, TokioScheduler, SystemClock::new())
    }

    /// Spawns a task with explicit scheduler and clock capabilities.
    ///
    /// Production callers want [`BatchTask::new`]; this entry point exists so
    /// tests can drive the task with deterministic fakes.
    pub fn with_runtime<P, S, C>(
        values: Vec<T>,
        processor: P,
        config: Config,
        scheduler: S,
        clock: C,
    ) -> Self
    where
        P: Processor<T> + 'static,
        S: Scheduler + 'static,
        C: Clock + 'static,
    {
        Self::spawn(values, Arc::new(processor), config, scheduler, clock)
    }

    fn spawn<S, C>(
        values: Vec<T>,
        processor: Arc<dyn Processor<T>>,
        config: Config,
        scheduler: S,
        clock: C,
    ) -> Self
    where
        S: Scheduler + 'static,
        C: Clock + 'static,
    {
        let shared = Arc::new(Shared {
            values,
            processor,
            budget: config.budget,
            name: config.name,
            status: AtomicU8::new(RUNNING),
            cursor: AtomicUsize::new(0),
            cancel: CancellationToken::new(),
            done: CancellationToken::new(),
        });

        debug!(
            task = shared.label(),
            len = shared.values.len(),
            "batch task spawned"
        );

        let driver = Arc::clone(&shared);
        tokio::spawn(async move {
            drive(driver, scheduler, clock).await;
        });

        Self { shared }
    }
}

impl<T> BatchTask<T> {
    /// Whether the task was canceled before finishing naturally.
    pub fn is_canceled(&self) -> bool {
        self.shared.status() == CANCELED
    }

    /// Whether the task processed every element or stopped on the
    /// processor's stop signal.
    pub fn is_completed(&self) -> bool {
        self.shared.status() == COMPLETED
    }

    /// Number of elements processed so far.
    pub fn position(&self) -> usize {
        self.shared.cursor.load(Ordering::Acquire)
    }

    /// Requests that the task stop. Idempotent and never fails.
    ///
    /// A batch already in flight finishes its current elements; the
    /// continuation observes the request at its next wake-up and stops
    /// without processing. Calling this after completion leaves the
    /// completed status and outcome untouched, though the request itself
    /// is still recorded on the cancel token.
    pub fn cancel(&self) {
        self.shared.cancel.cancel();
        if self.shared.finish(CANCELED) {
            debug!(task = self.shared.label(), "batch task canceled");
        }
    }

    /// The task's completion signal.
    ///
    /// Resolves `Ok(())` when every element was processed or the processor
    /// returned its stop signal, `Err(TaskError::Canceled)` when [`cancel`]
    /// won first. Any number of listeners may wait, before or after the
    /// outcome settles; late listeners observe it immediately. If the
    /// processor panics the signal never settles.
    ///
    /// [`cancel`]: BatchTask::cancel
    pub async fn wait(&self) -> Result<(), TaskError> {
        self.shared.done.cancelled().await;
        match self.shared.status() {
            COMPLETED => Ok(()),
            _ => Err(TaskError::Canceled),
        }
    }
}

/// Outcome of one scheduled batch.
enum Batch {
    /// The task reached its natural end inside this batch.
    Finished,
    /// Budget exhausted with elements remaining.
    Yielded,
}

async fn drive<T, S, C>(shared: Arc<Shared<T>>, scheduler: S, clock: C)
where
    T: Send + Sync,
    S: Scheduler,
    C: Clock,
{
    loop {
        scheduler.yield_turn().await;

        // Checked once per batch, not once per element: a cancel landing
        // mid-batch is observed here on the next wake-up.
        if shared.cancel.is_cancelled() || shared.status() != RUNNING {
            debug!(task = shared.label(), "batch task stopped before batch");
            return;
        }

        let outcome = match shared.budget {
            Budget::Iterations(limit) => counted_batch(&shared, limit.get()).await,
            Budget::Milliseconds(budget) => timed_batch(&shared, &clock, budget).await,
        };

        if let Batch::Finished = outcome {
            if shared.finish(COMPLETED) {
                debug!(
                    task = shared.label(),
                    processed = shared.cursor.load(Ordering::Acquire),
                    "batch task completed"
                );
            }
            return;
        }
    }
}

/// Runs one per-element step. `Break` means the task reached its natural
/// end, either past the last element or on the processor's stop signal.
async fn step<T>(shared: &Shared<T>) -> ControlFlow<()> {
    let i = shared.cursor.load(Ordering::Relaxed);
    let Some(item) = shared.values.get(i) else {
        return ControlFlow::Break(());
    };
    let flow = shared.processor.process(item).await;
    shared.cursor.store(i + 1, Ordering::Release);
    flow
}

async fn counted_batch<T>(shared: &Shared<T>, limit: usize) -> Batch {
    for _ in 0..limit {
        if step(shared).await.is_break() {
            return Batch::Finished;
        }
    }
    // Eager exhaustion check so a sequence of length k*limit takes exactly
    // k batches rather than k+1.
    if shared.cursor.load(Ordering::Relaxed) >= shared.values.len() {
        Batch::Finished
    } else {
        Batch::Yielded
    }
}

async fn timed_batch<T, C>(shared: &Shared<T>, clock: &C, budget: Duration) -> Batch
where
    C: Clock,
{
    let start = clock.now();
    loop {
        if step(shared).await.is_break() {
            return Batch::Finished;
        }
        if shared.cursor.load(Ordering::Relaxed) >= shared.values.len() {
            return Batch::Finished;
        }
        // Time is sampled between elements only, so a slow element overruns
        // the budget by at most its own processing time.
        if clock.now().saturating_sub(start) >= budget {
            return Batch::Yielded;
        }
    }
}
