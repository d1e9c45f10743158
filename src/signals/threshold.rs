//! Overbought / oversold classification

use crate::models::indicators::RsiZone;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("threshold {0} is outside 0..=100")]
    OutOfRange(f64),

    #[error("oversold floor {oversold} must be below overbought ceiling {overbought}")]
    Inverted { overbought: f64, oversold: f64 },
}

/// Static threshold pair; boundaries themselves classify as neutral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiThresholds {
    pub overbought: f64,
    pub oversold: f64,
}

impl RsiThresholds {
    pub const DEFAULT_OVERBOUGHT: f64 = 70.0;
    pub const DEFAULT_OVERSOLD: f64 = 30.0;

    pub fn new(overbought: f64, oversold: f64) -> Result<Self, ThresholdError> {
        for value in [overbought, oversold] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ThresholdError::OutOfRange(value));
            }
        }
        if oversold >= overbought {
            return Err(ThresholdError::Inverted {
                overbought,
                oversold,
            });
        }
        Ok(Self {
            overbought,
            oversold,
        })
    }

    pub fn classify(&self, rsi: f64) -> RsiZone {
        if rsi > self.overbought {
            RsiZone::Overbought
        } else if rsi < self.oversold {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            overbought: Self::DEFAULT_OVERBOUGHT,
            oversold: Self::DEFAULT_OVERSOLD,
        }
    }
}

/// Plain-text alert for a zone, `None` when neutral
pub fn alert_message(symbol: &str, zone: RsiZone, rsi: f64) -> Option<String> {
    zone.is_alert()
        .then(|| format!("{} RSI is {} at {:.2}", symbol, zone, rsi))
}
