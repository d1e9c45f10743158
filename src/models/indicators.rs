use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One time-bucketed price record. Only the close feeds the RSI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            open,
            high,
            low,
            close,
            timestamp,
        }
    }
}

/// Extract closing prices, preserving order
pub fn close_prices(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: usize,
}

/// Where an RSI value sits relative to the configured thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsiZone::Overbought => "overbought",
            RsiZone::Oversold => "oversold",
            RsiZone::Neutral => "neutral",
        }
    }

    /// Whether this zone warrants a notification
    pub fn is_alert(&self) -> bool {
        !matches!(self, RsiZone::Neutral)
    }
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
