//! Running several batch jobs with bounded concurrency.
//!
//! Run with: cargo run --example task_runner

use coop_batch::runner::{BatchJob, Runner, RunnerConfigBuilder, RunnerError};
use coop_batch::task::{Budget, ConfigBuilder};
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), RunnerError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let runner_config = RunnerConfigBuilder::default()
        .worker_num(2usize)
        .build()
        .map_err(|e| RunnerError::Configuration(e.to_string()))?;

    let mut runner = Runner::new(runner_config);
    for name in ["alpha", "beta", "gamma"] {
        let config = ConfigBuilder::default()
            .budget(Budget::iterations(8).unwrap())
            .build()
            .map_err(|e| RunnerError::Configuration(e.to_string()))?;

        runner.add_job(Arc::new(BatchJob::new(
            name,
            (0..32).collect::<Vec<i32>>(),
            move |x: &i32| {
                let x = *x;
                async move {
                    if x % 16 == 0 {
                        println!("[{name}] at {x}");
                    }
                    ControlFlow::Continue(())
                }
            },
            config,
        )));
    }

    let cancel = CancellationToken::new();
    runner.run_all(&cancel).await?;
    println!("all jobs finished");
    Ok(())
}
