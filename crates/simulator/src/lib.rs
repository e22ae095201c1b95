// Rust guideline compliant 2026-02-23

//! Simulator component -- generates transactions, writes each one to a `Sink`
//! hexagonal port, and sleeps a randomized interval between records.
//!
//! Entry points: [`Simulator::simulate_once`], [`Simulator::run`].
//! Configuration via [`SimulatorConfig::builder`]; cooperative shutdown via
//! [`shutdown_channel`].

mod shutdown;

pub use shutdown::{ShutdownSignal, ShutdownTrigger, shutdown_channel};

use domain::{Point, Sink, SinkError, TransactionRecord};
use generator::{Entropy, Generator};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::cell::{Cell, RefCell};
use std::time::Duration;

// ---------------------------------------------------------------------------
// SimulatorError
// ---------------------------------------------------------------------------

/// Errors that can end a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    /// The supplied configuration is invalid.
    #[error("invalid simulator configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A sink write failed and was not (or no longer) retried.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}

// ---------------------------------------------------------------------------
// SimulatorConfig + builder
// ---------------------------------------------------------------------------

/// Runtime configuration for a [`Simulator`].
///
/// Construct via [`SimulatorConfig::builder`].
#[derive(Debug)]
pub struct SimulatorConfig {
    /// Shortest pause between two records.
    pub min_delay: Duration,
    /// Longest pause between two records.
    pub max_delay: Duration,
    /// Optional upper bound on the number of records. `None` means infinite.
    pub iterations: Option<u64>,
    /// Optional RNG seed for reproducible delays. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Extra attempts for a transient sink error. `0` disables retry.
    pub retry_attempts: u32,
    /// Base pause between retries; attempt `n` waits `n * retry_backoff`.
    pub retry_backoff: Duration,
}

/// Builder for [`SimulatorConfig`].
///
/// Obtain via [`SimulatorConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct SimulatorConfigBuilder {
    min_delay: Duration,
    max_delay: Duration,
    iterations: Option<u64>,
    seed: Option<u64>,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl SimulatorConfig {
    /// Create a builder.
    ///
    /// Default values: delay in `[100 ms, 1 s]`, `iterations = None`,
    /// `seed = None`, `retry_attempts = 0`, `retry_backoff = 200 ms`.
    #[must_use]
    pub fn builder() -> SimulatorConfigBuilder {
        SimulatorConfigBuilder {
            min_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
            iterations: None,
            seed: None,
            retry_attempts: 0,
            retry_backoff: Duration::from_millis(200),
        }
    }
}

impl SimulatorConfigBuilder {
    /// Override the inter-record pause range (both ends inclusive).
    #[must_use]
    pub fn delay(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay = min;
        self.max_delay = max;
        self
    }

    /// Set a finite record count. Without this the simulator runs until shutdown.
    #[must_use]
    pub fn iterations(mut self, n: u64) -> Self {
        self.iterations = Some(n);
        self
    }

    /// Fix the RNG seed for deterministic delays (useful in tests).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Retry transient sink errors up to `attempts` extra times.
    #[must_use]
    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }

    /// Override the base pause between retries.
    #[must_use]
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::InvalidConfig`] when `min_delay > max_delay`.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<SimulatorConfig, SimulatorError> {
        if self.min_delay > self.max_delay {
            return Err(SimulatorError::InvalidConfig {
                reason: format!(
                    "min_delay ({:?}) must not exceed max_delay ({:?})",
                    self.min_delay, self.max_delay
                ),
            });
        }
        Ok(SimulatorConfig {
            min_delay: self.min_delay,
            max_delay: self.max_delay,
            iterations: self.iterations,
            seed: self.seed,
            retry_attempts: self.retry_attempts,
            retry_backoff: self.retry_backoff,
        })
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Lifecycle of a [`Simulator::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Generating and dispatching records.
    Running,
    /// Shutdown requested; no further dispatch will start.
    Stopping,
}

/// Drives the generate → map → dispatch → report → sleep loop.
///
/// Generic over the generator's `Entropy` and, per call, over the `Sink`
/// port for zero-cost static dispatch.
#[derive(Debug)]
pub struct Simulator<E: Entropy> {
    config: SimulatorConfig,
    generator: Generator<E>,
    /// Delay sampling; interior mutability required because methods take `&self`.
    rng: RefCell<StdRng>,
    state: Cell<RunState>,
}

impl<E: Entropy> Simulator<E> {
    /// Create a simulator from `config` and `generator`.
    ///
    /// Seeds the delay RNG from `config.seed` if set, otherwise from the OS.
    #[must_use]
    pub fn new(config: SimulatorConfig, generator: Generator<E>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            generator,
            rng: RefCell::new(rng),
            state: Cell::new(RunState::Running),
        }
    }

    /// Current run state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state.get()
    }

    /// Sample the next inter-record pause from `[min_delay, max_delay]`.
    fn next_delay(&self) -> Duration {
        let min = self.config.min_delay.as_secs_f64();
        let max = self.config.max_delay.as_secs_f64();
        Duration::from_secs_f64(self.rng.borrow_mut().random_range(min..=max))
    }

    /// Write `point`, retrying transient errors per configuration.
    ///
    /// No retry starts once `shutdown` has fired, and a backoff pause is cut
    /// short by it; the last error is returned in both cases.
    async fn dispatch<S: Sink>(
        &self,
        sink: &S,
        point: &Point,
        shutdown: &mut ShutdownSignal,
    ) -> Result<(), SinkError> {
        let mut attempt = 0u32;
        loop {
            match sink.write(point).await {
                Ok(()) => return Ok(()),
                Err(e)
                    if e.is_transient()
                        && attempt < self.config.retry_attempts
                        && !shutdown.is_triggered() =>
                {
                    attempt += 1;
                    tracing::warn!(
                        "simulator.dispatch.retry: attempt={attempt}/{} error={e}",
                        self.config.retry_attempts
                    );
                    tokio::select! {
                        () = tokio::time::sleep(self.config.retry_backoff * attempt) => {}
                        () = shutdown.triggered() => {
                            tracing::warn!("simulator.dispatch.abandoned: shutdown requested during backoff");
                            return Err(e);
                        }
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Generate one record, write it to `sink`, and emit its status line.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::Sink`] when the write fails (after any
    /// configured retries, which `shutdown` cuts off). The record is logged
    /// before the error propagates.
    pub async fn simulate_once<S: Sink>(
        &self,
        sink: &S,
        shutdown: &mut ShutdownSignal,
    ) -> Result<TransactionRecord, SimulatorError> {
        let record = self.generator.generate();
        let point = record.to_point();

        if let Err(e) = self.dispatch(sink, &point, shutdown).await {
            tracing::error!(
                "simulator.record.failed: amount={} risk={} status={} error={e}",
                record.amount,
                record.risk_level,
                record.status()
            );
            return Err(e.into());
        }

        let icon = if record.is_fraud { "🔴" } else { "🟢" };
        tracing::info!(
            "{icon} Tx: ${} | Risk: {} | Sent to {}",
            record.amount,
            record.risk_level,
            sink.name()
        );
        tracing::debug!(
            "simulator.record.sent: user={} merchant={} card={}",
            record.user,
            record.merchant,
            record.card
        );
        Ok(record)
    }

    /// Run the simulation loop until shutdown, then release `sink`.
    ///
    /// Takes ownership of the sink and calls [`Sink::close`] exactly once
    /// before returning, on every exit path. Stops cleanly when:
    /// - `shutdown` fires (checked before every dispatch and during the pause), or
    /// - `config.iterations` records have been sent.
    ///
    /// Returns the number of records sent.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::Sink`] for a write failure; the sink is
    /// still closed first.
    pub async fn run<S: Sink>(&self, sink: S, mut shutdown: ShutdownSignal) -> Result<u64, SimulatorError> {
        self.state.set(RunState::Running);
        let result = self.run_loop(&sink, &mut shutdown).await;
        sink.close().await;
        match &result {
            Ok(count) => tracing::info!("simulator.run.stopped: sent={count}"),
            Err(e) => tracing::error!("simulator.run.failed: error={e}"),
        }
        result
    }

    async fn run_loop<S: Sink>(&self, sink: &S, shutdown: &mut ShutdownSignal) -> Result<u64, SimulatorError> {
        let mut count = 0u64;
        loop {
            if shutdown.is_triggered() {
                self.state.set(RunState::Stopping);
            }
            if self.state.get() == RunState::Stopping {
                tracing::info!("simulator.run.stopping: shutdown requested after {count} record(s)");
                return Ok(count);
            }

            self.simulate_once(sink, shutdown).await?;
            count += 1;

            if let Some(max) = self.config.iterations
                && count >= max
            {
                tracing::info!("simulator.run.stopping: iteration limit reached");
                return Ok(count);
            }

            let delay = self.next_delay();
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = shutdown.triggered() => self.state.set(RunState::Stopping),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
