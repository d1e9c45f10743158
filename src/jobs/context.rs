//! Job context for dependency injection

use crate::config::Settings;
use crate::metrics::Metrics;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::Notifier;
use crate::signals::threshold::RsiThresholds;
use std::sync::Arc;

/// The fixed parameters of every cycle
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub symbol: String,
    pub interval: String,
    pub rsi_period: usize,
    pub thresholds: RsiThresholds,
    pub channel_id: u64,
}

impl From<&Settings> for CycleSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            symbol: settings.symbol.clone(),
            interval: settings.interval.clone(),
            rsi_period: settings.rsi_period,
            thresholds: settings.thresholds,
            channel_id: settings.channel_id,
        }
    }
}

/// Everything a cycle needs, constructed once at startup.
///
/// The notifier is expected to be connected by the caller before the first
/// cycle runs.
pub struct JobContext {
    pub data_provider: Arc<dyn MarketDataProvider + Send + Sync>,
    pub notifier: Arc<dyn Notifier + Send + Sync>,
    pub settings: CycleSettings,
    pub metrics: Option<Arc<Metrics>>,
}

impl JobContext {
    pub fn new(
        data_provider: Arc<dyn MarketDataProvider + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
        settings: CycleSettings,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self {
            data_provider,
            notifier,
            settings,
            metrics,
        }
    }
}
