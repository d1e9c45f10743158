//! Cycle driver: timeout, logging and metrics around one evaluation

use crate::config::{Settings, DEFAULT_CYCLE_TIMEOUT_SECONDS, DEFAULT_EVAL_INTERVAL_SECONDS};
use crate::jobs::context::JobContext;
use crate::jobs::handlers::run_cycle;
use crate::jobs::types::{CycleError, CycleOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Configuration for the cycle runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub evaluation_interval_seconds: u64,
    pub cycle_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_seconds: DEFAULT_EVAL_INTERVAL_SECONDS,
            cycle_timeout: Duration::from_secs(DEFAULT_CYCLE_TIMEOUT_SECONDS),
        }
    }
}

impl From<&Settings> for RuntimeConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            evaluation_interval_seconds: settings.eval_interval_seconds,
            cycle_timeout: settings.cycle_timeout,
        }
    }
}

/// Runs evaluation cycles. Failures are logged and counted, never returned:
/// each cycle stands alone and the next tick starts fresh.
pub struct SignalRuntime {
    config: RuntimeConfig,
    job_context: Arc<JobContext>,
    last_outcome: RwLock<Option<CycleOutcome>>,
}

impl SignalRuntime {
    pub fn new(config: RuntimeConfig, job_context: Arc<JobContext>) -> Self {
        Self {
            config,
            job_context,
            last_outcome: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Outcome of the most recent successful cycle
    pub async fn last_outcome(&self) -> Option<CycleOutcome> {
        self.last_outcome.read().await.clone()
    }

    /// Run one cycle under the configured timeout
    pub async fn run_once(&self) -> Option<CycleOutcome> {
        let ctx = &self.job_context;
        let symbol = &ctx.settings.symbol;
        let start = Instant::now();

        if let Some(ref metrics) = ctx.metrics {
            metrics.cycles_total.inc();
        }

        let result = match tokio::time::timeout(self.config.cycle_timeout, run_cycle(ctx)).await {
            Ok(result) => result,
            Err(_) => Err(CycleError::Timeout(self.config.cycle_timeout)),
        };

        if let Some(ref metrics) = ctx.metrics {
            metrics
                .cycle_duration_seconds
                .observe(start.elapsed().as_secs_f64());
        }

        match result {
            Ok(outcome) => {
                info!(
                    symbol = %symbol,
                    rsi = outcome.rsi.value,
                    zone = %outcome.zone,
                    notified = outcome.notified,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "cycle complete for {}",
                    symbol
                );
                *self.last_outcome.write().await = Some(outcome.clone());
                Some(outcome)
            }
            Err(e) => {
                if let Some(ref metrics) = ctx.metrics {
                    metrics
                        .cycle_failures_total
                        .with_label_values(&[e.reason()])
                        .inc();
                }
                match &e {
                    CycleError::Indicator(_) => {
                        warn!(symbol = %symbol, error = %e, "cycle skipped for {}", symbol)
                    }
                    _ => error!(symbol = %symbol, error = %e, "cycle failed for {}", symbol),
                }
                None
            }
        }
    }
}
