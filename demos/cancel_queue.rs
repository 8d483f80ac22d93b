//! Stopping a running queue and inspecting what happened

use parq::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> parq::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Queue Cancellation Example ===\n");

    parq::init_with_config(
        QueueConfig::builder()
            .max_parallel(2)
            .name("cancel-demo")
            .build()?,
    )?;

    let tasks: Vec<TaskFactory<u64>> = (0..8u64)
        .map(|i| {
            task(move |token: CancelToken| async move {
                // Even tasks watch the token, odd ones ignore it
                if i % 2 == 0 {
                    sleep(Duration::from_millis(40 + i * 10), Some(&token)).await?;
                } else {
                    tokio::time::sleep(Duration::from_millis(40 + i * 10)).await;
                }
                Ok(i)
            })
        })
        .collect();

    let mut runner = run_parallel_queue(tasks, RunOptions::default())?;
    let events = runner.subscribe();
    let handle = runner.handle();

    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("  event: {:?}", event);
        }
    });

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(120)).await;
        println!("  >>> cancelling");
        handle.cancel();
    });

    let result = runner.run().await;
    let _ = printer.await;

    println!("\nCancelled: {}", result.cancelled);
    println!("Fulfilled: {:?}", result.fulfilled);
    println!("Rejected:  {:?}", result.rejected);
    for (i, outcome) in result.results.iter().enumerate() {
        println!("  task {} -> {:?}", i, outcome);
    }

    let metrics = parq::runtime::global_metrics()?;
    println!("\n{}", JsonExporter::to_json(&metrics.snapshot())?);

    parq::shutdown();
    println!("\n=== Example Complete ===");
    Ok(())
}
