//! In-memory collaborators for cycle tests
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use rsi_sentry::jobs::context::{CycleSettings, JobContext};
use rsi_sentry::metrics::Metrics;
use rsi_sentry::models::indicators::Candle;
use rsi_sentry::services::market_data::{FetchError, MarketDataProvider};
use rsi_sentry::services::notifier::{Notifier, NotifyError};
use rsi_sentry::signals::threshold::RsiThresholds;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const CHANNEL_ID: u64 = 424242;

pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let ts = Utc
                .timestamp_opt(1_700_000_000 + i as i64 * 3600, 0)
                .unwrap();
            Candle::new(close, close, close, close, ts)
        })
        .collect()
}

pub fn rising(count: usize) -> Vec<f64> {
    (0..count).map(|i| 100.0 + i as f64).collect()
}

pub fn falling(count: usize) -> Vec<f64> {
    (0..count).map(|i| 100.0 - i as f64).collect()
}

/// Alternating up/down moves of equal size
pub fn choppy(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| if i % 2 == 0 { 10.0 } else { 11.0 })
        .collect()
}

pub struct StaticProvider {
    closes: Vec<f64>,
    delay: Option<Duration>,
    fail: bool,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(closes: Vec<f64>) -> Self {
        Self {
            closes,
            delay: None,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn slow(closes: Vec<f64>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(closes)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for StaticProvider {
    async fn fetch_recent_candles(
        &self,
        _symbol: &str,
        _interval: &str,
        _count: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(FetchError::Status { status: 503 });
        }
        Ok(candles_from_closes(&self.closes))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(u64, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<(u64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::NotConnected);
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel_id, text.to_string()));
        Ok(())
    }
}

pub fn cycle_settings() -> CycleSettings {
    CycleSettings {
        symbol: "SOLUSDT".to_string(),
        interval: "60".to_string(),
        rsi_period: 14,
        thresholds: RsiThresholds::default(),
        channel_id: CHANNEL_ID,
    }
}

pub fn context(
    provider: Arc<StaticProvider>,
    notifier: Arc<RecordingNotifier>,
    metrics: Option<Arc<Metrics>>,
) -> Arc<JobContext> {
    Arc::new(JobContext::new(
        provider,
        notifier,
        cycle_settings(),
        metrics,
    ))
}
