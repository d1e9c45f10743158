//! Market data provider interface.

use crate::models::indicators::{close_prices, Candle};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("rate limited by price source")]
    RateLimited,

    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Transient failures worth another attempt within the same cycle
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::RateLimited => true,
            FetchError::Http(e) => !e.is_decode(),
            FetchError::Status { status } => *status >= 500,
            FetchError::Api { .. } | FetchError::Malformed(_) => false,
        }
    }
}

#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Most recent `count` candles for `symbol`, oldest first
    async fn fetch_recent_candles(
        &self,
        symbol: &str,
        interval: &str,
        count: usize,
    ) -> Result<Vec<Candle>, FetchError>;

    /// Closing prices of the most recent `count` candles, oldest first
    async fn fetch_recent_closes(
        &self,
        symbol: &str,
        interval: &str,
        count: usize,
    ) -> Result<Vec<f64>, FetchError> {
        let candles = self.fetch_recent_candles(symbol, interval, count).await?;
        Ok(close_prices(&candles))
    }
}
