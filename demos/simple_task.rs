//! Simple batch task example showing cooperative batched processing.
//!
//! Run with: cargo run --example simple_task

use coop_batch::task::{BatchTask, Budget, ConfigBuilder};
use std::ops::ControlFlow;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = ConfigBuilder::default()
        .budget(Budget::iterations(10).unwrap())
        .name(String::from("squares"))
        .build()?;

    let values: Vec<i64> = (1..=50).collect();

    println!("Starting batch task...");
    println!("- Budget: 10 elements per batch");
    println!("- Processing {} values\n", values.len());

    let task = BatchTask::new(
        values,
        |x: &i64| {
            let x = *x;
            async move {
                println!("{x}^2 = {}", x * x);
                ControlFlow::Continue(())
            }
        },
        config,
    );

    task.wait().await?;
    println!("\nBatch task completed after {} elements", task.position());
    Ok(())
}
