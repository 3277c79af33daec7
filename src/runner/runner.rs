use derive_builder::Builder;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::job::Job;
use super::types::RunnerError;

/// Configuration for runner execution
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct RunnerConfig {
    /// Maximum number of jobs in flight at once
    #[builder(default = "num_cpus::get()")]
    pub worker_num: usize,
}

impl RunnerConfig {
    /// Creates a new RunnerConfig with the specified number of workers
    pub fn new(worker_num: usize) -> Self {
        RunnerConfig { worker_num }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            worker_num: num_cpus::get(),
        }
    }
}

/// Executes a set of [`Job`]s with bounded concurrency.
///
/// Jobs share the caller's cooperative runtime; the bound limits how many
/// job futures are in flight, it does not introduce threads.
pub struct Runner {
    jobs: Vec<Arc<dyn Job>>,
    cfg: RunnerConfig,
}

impl Runner {
    pub fn new(cfg: RunnerConfig) -> Self {
        Runner {
            jobs: Vec::new(),
            cfg,
        }
    }

    pub fn add_job(&mut self, job: Arc<dyn Job>) {
        self.jobs.push(job);
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Runs every job and returns the first failure, if any.
    ///
    /// `cancel` is forwarded to each job; canceled jobs settle as failed
    /// rather than being dropped mid-flight.
    pub async fn run_all(&self, cancel: &CancellationToken) -> Result<(), RunnerError> {
        let worker_num = self.cfg.worker_num.max(1);

        let results: Vec<(String, Result<(), RunnerError>)> =
            stream::iter(self.jobs.iter().map(|job| {
                let job = Arc::clone(job);
                let cancel = cancel.clone();
                async move {
                    let outcome = job.run(&cancel).await;
                    (job.name().to_string(), outcome)
                }
            }))
            .buffer_unordered(worker_num)
            .collect()
            .await;

        for (name, outcome) in results {
            match outcome {
                Ok(()) => debug!(job = name.as_str(), "job finished"),
                Err(err) => {
                    warn!(job = name.as_str(), error = %err, "job failed");
                    return Err(RunnerError::Job(name, err.to_string()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
