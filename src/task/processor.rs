// src/task/processor.rs

use async_trait::async_trait;
use std::ops::ControlFlow;

/// Per-element callback applied by a batch task.
///
/// `Continue(())` keeps the task going; `Break(())` is the stop signal that
/// ends the task early as a successful completion, not a cancellation.
#[async_trait]
pub trait Processor<T>: Send + Sync {
    async fn process(&self, item: &T) -> ControlFlow<()>;
}

#[async_trait]
impl<T, F, Fut> Processor<T> for F
where
    F: Fn(&T) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = ControlFlow<()>> + Send,
    T: Send + Sync,
{
    async fn process(&self, item: &T) -> ControlFlow<()> {
        self(item).await
    }
}
