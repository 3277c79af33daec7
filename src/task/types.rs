use thiserror::Error;

/// Errors surfaced by batch tasks.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The task was canceled before it finished naturally.
    ///
    /// This is the only outcome `cancel()` can produce; the processor
    /// itself has no error channel.
    #[error("canceled")]
    Canceled,

    /// A task or runner was built from an invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskError::Canceled;
        assert_eq!(err.to_string(), "canceled");

        let err = TaskError::Configuration("bad budget".to_string());
        assert_eq!(err.to_string(), "configuration error: bad budget");
    }
}
