// src/task/config.rs

use derive_builder::Builder;
use std::num::NonZeroUsize;
use std::time::Duration;

/// How much work a single batch may do before control is yielded back to
/// the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// At most this many elements per batch.
    Iterations(NonZeroUsize),

    /// Keep starting new elements while the elapsed time within the batch
    /// is strictly below this duration. The time check runs between
    /// elements only, so a batch may overrun by one element's processing
    /// time.
    Milliseconds(Duration),
}

impl Budget {
    /// Fixed-size batches of `amount` elements.
    ///
    /// Returns `None` when `amount` is zero, which would never make progress.
    pub fn iterations(amount: usize) -> Option<Self> {
        NonZeroUsize::new(amount).map(Budget::Iterations)
    }

    /// Fixed-duration batches of `amount` milliseconds.
    ///
    /// Returns `None` when `amount` is zero.
    pub fn milliseconds(amount: u64) -> Option<Self> {
        (amount > 0).then(|| Budget::Milliseconds(Duration::from_millis(amount)))
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    /// Work budget for a single batch before control is yielded
    #[builder(default = "Budget::Iterations(NonZeroUsize::MIN)")]
    pub(crate) budget: Budget,

    /// Optional task name carried into log events
    #[builder(default)]
    pub(crate) name: Option<String>,
}

impl Config {
    /// Creates a Config with the given budget and no name
    pub fn new(budget: Budget) -> Self {
        Config { budget, name: None }
    }

    /// Returns the batch budget
    #[inline]
    pub fn budget(&self) -> Budget {
        self.budget
    }

    /// Returns the task name, if one was set
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_constructors_reject_zero() {
        assert!(Budget::iterations(0).is_none());
        assert!(Budget::milliseconds(0).is_none());

        assert_eq!(
            Budget::iterations(3),
            Some(Budget::Iterations(NonZeroUsize::new(3).unwrap()))
        );
        assert_eq!(
            Budget::milliseconds(25),
            Some(Budget::Milliseconds(Duration::from_millis(25)))
        );
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = ConfigBuilder::default().build().unwrap();
        assert_eq!(config.budget(), Budget::Iterations(NonZeroUsize::MIN));
        assert!(config.name().is_none());

        let config = ConfigBuilder::default()
            .budget(Budget::iterations(4).unwrap())
            .name(String::from("ingest"))
            .build()
            .unwrap();
        assert_eq!(config.budget(), Budget::iterations(4).unwrap());
        assert_eq!(config.name(), Some("ingest"));
    }
}
