//! Bybit REST client for mark-price klines

use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::messages::KlineResponse;
use crate::models::indicators::Candle;
use crate::services::market_data::{FetchError, MarketDataProvider};

const KLINE_PATH: &str = "/v5/market/mark-price-kline";
const CATEGORY: &str = "linear";
/// Upper bound Bybit accepts for `limit`
pub const MAX_KLINE_LIMIT: usize = 1000;

/// Bounded retry applied to a single fetch
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(60),
        }
    }
}

pub struct BybitRestClient {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl BybitRestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch up to `limit` klines, retrying transient failures
    pub async fn mark_price_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        let limit = limit.clamp(1, MAX_KLINE_LIMIT);
        let policy = ConstantBuilder::default()
            .with_delay(self.retry.delay)
            .with_max_times(self.retry.max_retries);

        let mut candles = (move || async move {
            self.request_klines(symbol, interval, limit).await
        })
            .retry(policy)
            .sleep(tokio::time::sleep)
            .when(|err: &FetchError| err.is_retryable())
            .notify(|err: &FetchError, after: Duration| {
                warn!(
                    symbol = %symbol,
                    error = %err,
                    retry_in_secs = after.as_secs_f64(),
                    "Bybit kline request failed, retrying in {:?}",
                    after
                );
            })
            .await?;

        if candles.len() > limit {
            candles = candles.split_off(candles.len() - limit);
        }
        Ok(candles)
    }

    async fn request_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        let url = format!("{}{}", self.base_url, KLINE_PATH);
        let limit = limit.to_string();

        debug!(symbol = %symbol, interval = %interval, limit = %limit, "requesting klines");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("category", CATEGORY),
                ("symbol", symbol),
                ("interval", interval),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: KlineResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;
        body.into_candles()
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for BybitRestClient {
    async fn fetch_recent_candles(
        &self,
        symbol: &str,
        interval: &str,
        count: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        self.mark_price_klines(symbol, interval, count).await
    }
}
