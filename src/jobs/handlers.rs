//! Cycle steps

use crate::indicators::momentum::rsi::compute_rsi;
use crate::jobs::context::JobContext;
use crate::jobs::types::{CycleError, CycleOutcome};
use crate::models::indicators::{RsiIndicator, RsiZone};
use crate::signals::threshold::alert_message;
use tracing::{debug, info};

/// Fetch `period + 1` closes, oldest first
pub async fn handle_fetch_closes(ctx: &JobContext) -> Result<Vec<f64>, CycleError> {
    let settings = &ctx.settings;
    let count = settings.rsi_period + 1;

    let closes = ctx
        .data_provider
        .fetch_recent_closes(&settings.symbol, &settings.interval, count)
        .await?;

    debug!(
        symbol = %settings.symbol,
        count = closes.len(),
        "fetched {} closes for {}",
        closes.len(),
        settings.symbol
    );
    Ok(closes)
}

/// Compute and classify the RSI of `closes`
pub fn handle_evaluate_rsi(
    ctx: &JobContext,
    closes: &[f64],
) -> Result<(RsiIndicator, RsiZone), CycleError> {
    let settings = &ctx.settings;
    let value = compute_rsi(closes, settings.rsi_period)?;
    let zone = settings.thresholds.classify(value);

    if let Some(ref metrics) = ctx.metrics {
        metrics.last_rsi.set(value);
    }

    info!(
        symbol = %settings.symbol,
        rsi = value,
        zone = %zone,
        "RSI value: {:.2} ({})",
        value,
        zone
    );

    Ok((
        RsiIndicator {
            value,
            period: settings.rsi_period,
        },
        zone,
    ))
}

/// Send an alert for overbought/oversold; returns whether one was sent
pub async fn handle_notify(
    ctx: &JobContext,
    zone: RsiZone,
    rsi: f64,
) -> Result<bool, CycleError> {
    let settings = &ctx.settings;
    let Some(message) = alert_message(&settings.symbol, zone, rsi) else {
        debug!(symbol = %settings.symbol, "RSI neutral, no alert");
        return Ok(false);
    };

    ctx.notifier
        .send_message(settings.channel_id, &message)
        .await?;

    if let Some(ref metrics) = ctx.metrics {
        metrics.notifications_total.inc();
    }
    info!(
        symbol = %settings.symbol,
        channel_id = settings.channel_id,
        zone = %zone,
        "alert sent: {}",
        message
    );
    Ok(true)
}

/// Run one full cycle: fetch → compute → classify → notify
pub async fn run_cycle(ctx: &JobContext) -> Result<CycleOutcome, CycleError> {
    let closes = handle_fetch_closes(ctx).await?;
    let (rsi, zone) = handle_evaluate_rsi(ctx, &closes)?;
    let notified = handle_notify(ctx, zone, rsi.value).await?;

    Ok(CycleOutcome {
        rsi,
        zone,
        notified,
    })
}
