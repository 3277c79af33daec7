pub mod config;
pub mod processor;
pub mod runtime;
pub mod task;
pub mod types;

pub use config::{Budget, Config, ConfigBuilder};
pub use processor::Processor;
pub use runtime::{Clock, Scheduler, SystemClock, TokioScheduler};
pub use task::BatchTask;
pub use types::TaskError;
