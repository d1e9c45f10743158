//! Integration tests for full evaluation cycles
//!
//! Bybit and Discord are both served by wiremock; the cycle runs through
//! the same runtime the worker binary uses.

use crate::test_utils::{
    bybit_client, discord_client, falling, mock_bybit_klines, mock_discord_login, rising,
    CHANNEL_ID,
};
use rsi_sentry::core::runtime::{RuntimeConfig, SignalRuntime};
use rsi_sentry::jobs::context::{CycleSettings, JobContext};
use rsi_sentry::metrics::Metrics;
use rsi_sentry::models::indicators::RsiZone;
use rsi_sentry::signals::threshold::RsiThresholds;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestWorker {
    bybit: MockServer,
    discord: MockServer,
    metrics: Arc<Metrics>,
}

impl TestWorker {
    async fn new(closes: &[f64]) -> Self {
        let bybit = MockServer::start().await;
        mock_bybit_klines(&bybit, closes).await;

        let discord = MockServer::start().await;
        mock_discord_login(&discord).await;

        Self {
            bybit,
            discord,
            metrics: Arc::new(Metrics::new().expect("metrics initialization")),
        }
    }

    async fn runtime(&self) -> SignalRuntime {
        let notifier = Arc::new(discord_client(&self.discord));
        notifier.connect().await.expect("login succeeds");

        let settings = CycleSettings {
            symbol: "SOLUSDT".to_string(),
            interval: "60".to_string(),
            rsi_period: 14,
            thresholds: RsiThresholds::default(),
            channel_id: CHANNEL_ID,
        };
        let ctx = Arc::new(JobContext::new(
            Arc::new(bybit_client(&self.bybit)),
            notifier,
            settings,
            Some(self.metrics.clone()),
        ));

        SignalRuntime::new(
            RuntimeConfig {
                evaluation_interval_seconds: 3600,
                cycle_timeout: Duration::from_secs(5),
            },
            ctx,
        )
    }
}

fn message_mock(content: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path(format!("/channels/{}/messages", CHANNEL_ID)))
        .and(body_json(json!({ "content": content })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
}

#[tokio::test]
async fn overbought_market_posts_alert() {
    let worker = TestWorker::new(&rising(15)).await;
    message_mock("SOLUSDT RSI is overbought at 100.00")
        .expect(1)
        .mount(&worker.discord)
        .await;

    let outcome = worker.runtime().await.run_once().await.expect("cycle succeeds");

    assert_eq!(outcome.zone, RsiZone::Overbought);
    assert!(outcome.notified);
    assert_eq!(worker.metrics.notifications_total.get(), 1);
}

#[tokio::test]
async fn oversold_market_posts_alert() {
    let worker = TestWorker::new(&falling(15)).await;
    message_mock("SOLUSDT RSI is oversold at 0.00")
        .expect(1)
        .mount(&worker.discord)
        .await;

    let outcome = worker.runtime().await.run_once().await.expect("cycle succeeds");
    assert_eq!(outcome.zone, RsiZone::Oversold);
}

#[tokio::test]
async fn neutral_market_posts_nothing() {
    let closes: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 150.0 } else { 151.0 }).collect();
    let worker = TestWorker::new(&closes).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&worker.discord)
        .await;

    let outcome = worker.runtime().await.run_once().await.expect("cycle succeeds");

    assert_eq!(outcome.zone, RsiZone::Neutral);
    assert!(!outcome.notified);
}

#[tokio::test]
async fn exchange_outage_skips_cycle() {
    let bybit = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&bybit)
        .await;
    let worker = TestWorker {
        bybit,
        discord: MockServer::start().await,
        metrics: Arc::new(Metrics::new().unwrap()),
    };
    mock_discord_login(&worker.discord).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&worker.discord)
        .await;

    let runtime = worker.runtime().await;
    assert!(runtime.run_once().await.is_none());
    assert!(runtime.last_outcome().await.is_none());
    assert_eq!(
        worker
            .metrics
            .cycle_failures_total
            .with_label_values(&["fetch"])
            .get(),
        1
    );
}

#[tokio::test]
async fn too_few_candles_skips_cycle() {
    let worker = TestWorker::new(&rising(8)).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&worker.discord)
        .await;

    let runtime = worker.runtime().await;
    assert!(runtime.run_once().await.is_none());
    assert_eq!(
        worker
            .metrics
            .cycle_failures_total
            .with_label_values(&["indicator"])
            .get(),
        1
    );
}
