//! Time-budgeted batch task with a mid-run cancel.
//!
//! Run with: cargo run --example timed_task

use coop_batch::task::{BatchTask, Budget, Config};
use std::ops::ControlFlow;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Each batch keeps going while under 5ms of elapsed time.
    let config = Config::new(Budget::milliseconds(5).unwrap());

    let task = BatchTask::new(
        (0..200).collect::<Vec<u32>>(),
        |n: &u32| {
            let n = *n;
            async move {
                // Simulate roughly 1ms of work per element
                tokio::time::sleep(Duration::from_millis(1)).await;
                if n % 50 == 0 {
                    println!("reached {n}");
                }
                ControlFlow::Continue(())
            }
        },
        config,
    );

    // Cancel from the outside while the task is still working.
    let handle = task.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.cancel();
    });

    match task.wait().await {
        Ok(()) => println!("completed all {} elements", task.position()),
        Err(err) => println!("stopped early after {} elements: {err}", task.position()),
    }
    Ok(())
}
