//! Cycle results and failures

use crate::indicators::IndicatorError;
use crate::models::indicators::{RsiIndicator, RsiZone};
use crate::services::market_data::FetchError;
use crate::services::notifier::NotifyError;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Result of a completed cycle
#[derive(Debug, Clone, Serialize)]
pub struct CycleOutcome {
    pub rsi: RsiIndicator,
    pub zone: RsiZone,
    pub notified: bool,
}

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("rsi unavailable: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),

    #[error("cycle exceeded {0:?}")]
    Timeout(Duration),
}

impl CycleError {
    /// Short label used for the failure counter
    pub fn reason(&self) -> &'static str {
        match self {
            CycleError::Fetch(_) => "fetch",
            CycleError::Indicator(_) => "indicator",
            CycleError::Notify(_) => "notify",
            CycleError::Timeout(_) => "timeout",
        }
    }
}
