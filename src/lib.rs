//! # coop-batch
//!
//! Cooperative batch processing for single-runtime Tokio applications.
//!
//! ## Features
//!
//! - **Batched element processing** that yields between batches instead of
//!   monopolizing the scheduler
//! - **Two batch budgets**: a fixed element count or a wall-clock window
//! - **Cooperative cancellation** with a single-resolution completion signal
//! - **Injectable scheduler and clock** for deterministic tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coop_batch::task::{BatchTask, Budget, Config};
//! use std::ops::ControlFlow;
//!
//! // Process five values, three per scheduler turn
//! let config = Config::new(Budget::iterations(3).unwrap());
//! let task = BatchTask::new(
//!     vec![1, 2, 3, 4, 5],
//!     |x: &i32| {
//!         println!("{x}");
//!         futures::future::ready(ControlFlow::Continue(()))
//!     },
//!     config,
//! );
//! task.wait().await?;
//! ```
//!
//! ## Modules
//!
//! - [`task`] - The cooperative batch task engine
//! - [`runner`] - Bounded-concurrency execution of sets of batch jobs

pub mod runner;
pub mod task;
