//! Cron-based scheduler driving evaluation cycles

use crate::core::runtime::SignalRuntime;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    ZeroInterval,

    #[error("interval of {0}s cannot be expressed as a cron schedule")]
    UnsupportedInterval(u64),

    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },
}

/// Convert an interval into a cron expression aligned to wall-clock
/// boundaries (an hourly interval fires at minute 0).
///
/// A `*/N` step restarts at every enclosing boundary, so the interval must
/// divide its enclosing unit (minute, hour or day) to keep ticks evenly spaced.
///
/// Cron format: second minute hour day month weekday
pub fn interval_to_cron(interval_seconds: u64) -> Result<String, SchedulerError> {
    match interval_seconds {
        0 => Err(SchedulerError::ZeroInterval),
        s if s % 3600 == 0 && 86400 % s == 0 => Ok(format!("0 0 */{} * * *", s / 3600)),
        s if s % 60 == 0 && 3600 % s == 0 => Ok(format!("0 */{} * * * *", s / 60)),
        s if 60 % s == 0 => Ok(format!("*/{} * * * * *", s)),
        s => Err(SchedulerError::UnsupportedInterval(s)),
    }
}

/// Runs one cycle at start, then one per cron tick.
///
/// Cycles execute inline in a single task, so a slow cycle delays the next
/// tick instead of overlapping it.
pub struct JobScheduler {
    runtime: Arc<SignalRuntime>,
    schedule: Schedule,
    cron_expr: String,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl JobScheduler {
    /// Build a scheduler firing at the runtime's evaluation interval
    pub fn new(runtime: Arc<SignalRuntime>) -> Result<Self, SchedulerError> {
        let interval_seconds = runtime.config().evaluation_interval_seconds;
        let cron_expr = interval_to_cron(interval_seconds)?;
        let schedule =
            Schedule::from_str(&cron_expr).map_err(|e| SchedulerError::InvalidCron {
                expr: cron_expr.clone(),
                reason: e.to_string(),
            })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "JobScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            runtime,
            schedule,
            cron_expr,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn cron_expression(&self) -> &str {
        &self.cron_expr
    }

    /// Start the scheduler loop; calling it twice is a no-op
    pub async fn start(&self) {
        let mut guard = self.handle.write().await;
        if guard.is_some() {
            debug!("JobScheduler: already running");
            return;
        }

        let runtime = self.runtime.clone();
        let schedule = self.schedule.clone();

        *guard = Some(tokio::spawn(async move {
            info!("JobScheduler: running initial cycle");
            runtime.run_once().await;

            loop {
                let Some(next_tick) = schedule.upcoming(chrono::Utc).next() else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                };

                let wait = (next_tick - chrono::Utc::now()).to_std().unwrap_or_default();
                debug!(next = %next_tick, "JobScheduler: sleeping until next tick");
                tokio::time::sleep(wait).await;

                runtime.run_once().await;
            }
        }));

        info!("JobScheduler: started");
    }

    /// Stop the scheduler, abandoning any in-flight cycle
    pub async fn stop(&self) {
        if let Some(h) = self.handle.write().await.take() {
            h.abort();
            info!("JobScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
