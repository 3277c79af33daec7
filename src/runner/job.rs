use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::types::RunnerError;
use crate::task::{BatchTask, Config, Processor};

/// A unit of work a [`Runner`](super::Runner) can execute.
#[async_trait]
pub trait Job: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self, cancel: &CancellationToken) -> Result<(), RunnerError>;
}

/// Binds a value sequence, a processor, and a task config into a [`Job`].
///
/// Each `run` spawns a fresh [`BatchTask`] over a clone of the values, so a
/// job can be executed more than once.
pub struct BatchJob<T> {
    name: String,
    values: Vec<T>,
    processor: Arc<dyn Processor<T>>,
    config: Config,
}

impl<T> BatchJob<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<P>(name: impl Into<String>, values: Vec<T>, processor: P, config: Config) -> Self
    where
        P: Processor<T> + 'static,
    {
        BatchJob {
            name: name.into(),
            values,
            processor: Arc::new(processor),
            config,
        }
    }
}

#[async_trait]
impl<T> Job for BatchJob<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, cancel: &CancellationToken) -> Result<(), RunnerError> {
        let mut config = self.config.clone();
        if config.name.is_none() {
            config.name = Some(self.name.clone());
        }

        let task = BatchTask::from_arc(
            self.values.clone(),
            Arc::clone(&self.processor),
            config,
        );
        debug!(job = self.name.as_str(), len = self.values.len(), "batch job started");

        tokio::select! {
            _ = cancel.cancelled() => {
                task.cancel();
                task.wait().await.map_err(RunnerError::from)
            }
            outcome = task.wait() => outcome.map_err(RunnerError::from),
        }
    }
}
