// Rust guideline compliant 2026-02-27

//! Transaction simulator entry point.
//!
//! Wires the generator and simulator loop to the InfluxDB sink and runs until
//! CTRL+C. Connection settings come from `INFLUXDB_URL`, `INFLUXDB_TOKEN`,
//! `INFLUXDB_ORG`, `INFLUXDB_BUCKET` (and optionally `INFLUXDB_TIMEOUT_MS`,
//! `INFLUXDB_RETRY_ATTEMPTS`, `INFLUXDB_RETRY_BACKOFF_MS`), read from the
//! environment or a `.env` file in the working directory.
//!
//! The first CTRL+C lets the in-flight write finish; a second one abandons it
//! and exits non-zero.
//!
//! # Usage
//!
//! ```text
//! # Infinite mode -- press CTRL+C to stop
//! RUST_LOG=info cargo run
//!
//! # Also show per-record user/merchant/card detail
//! RUST_LOG=debug cargo run
//! ```

mod adapters;
mod config;

use adapters::influx_sink::InfluxSink;
use anyhow::Context as _;
use config::SinkConfig;
use generator::Generator;
use simulator::{ShutdownTrigger, Simulator, SimulatorConfig, SimulatorError, shutdown_channel};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env before the subscriber so RUST_LOG may live there too.
    let dotenv_result = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = dotenv_result {
        tracing::debug!("main.dotenv.skipped: {e}");
    }

    let sink_config = SinkConfig::from_env();
    tracing::info!("main.config: {sink_config:?}");

    // Defaults: one record every 100 ms - 1 s, no retry on write failure.
    let mut builder = SimulatorConfig::builder().retry_attempts(sink_config.retry_attempts);
    if let Some(backoff) = sink_config.retry_backoff {
        builder = builder.retry_backoff(backoff);
    }
    let simulator_config = builder.build().context("failed to build simulator config")?;

    let sink = InfluxSink::new(sink_config).context("failed to create InfluxDB sink")?;
    let simulator = Simulator::new(simulator_config, Generator::from_seed(None));

    let (trigger, signal) = shutdown_channel();

    tracing::info!("🚀 Starting transaction simulation...");

    let sent = supervise(simulator.run(sink, signal), &trigger, tokio::signal::ctrl_c).await?;
    tracing::info!("🛑 Simulation stopped by user. ({sent} transaction(s) sent)");
    Ok(())
}

/// Drive `run` to completion while listening for interrupts.
///
/// The first interrupt only requests the stop: the loop finishes its current
/// write, closes the sink, and returns. A second interrupt before that gives
/// up on the run and returns an error.
async fn supervise<R, I, F>(
    run: R,
    trigger: &ShutdownTrigger,
    mut interrupt: I,
) -> anyhow::Result<u64>
where
    R: Future<Output = Result<u64, SimulatorError>>,
    I: FnMut() -> F,
    F: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(run);

    tokio::select! {
        result = &mut run => return result.context("simulation failed"),
        received = interrupt() => match received {
            Ok(()) => {
                tracing::info!("main.shutdown: ctrl_c received");
                trigger.trigger();
            }
            Err(e) => {
                tracing::error!("main.shutdown: ctrl_c listener failed: {e}");
                return run.await.context("simulation failed");
            }
        },
    }

    tokio::select! {
        result = &mut run => result.context("simulation failed"),
        received = interrupt() => {
            if let Err(e) = received {
                tracing::error!("main.shutdown: ctrl_c listener failed: {e}");
                return run.await.context("simulation failed");
            }
            tracing::warn!("main.shutdown.forced: second ctrl_c, abandoning in-flight write");
            anyhow::bail!("interrupted again before the simulation stopped")
        }
    }
}
