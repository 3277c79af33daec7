use crate::task::TaskError;

/// Errors that can occur while running a set of batch jobs
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("job '{0}' failed: {1}")]
    Job(String, String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("task failed: {0}")]
    Task(#[from] TaskError),
}
