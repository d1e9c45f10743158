//! RSI (Relative Strength Index) indicator

use crate::indicators::error::IndicatorError;
use crate::models::indicators::{close_prices, Candle, RsiIndicator};

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Compute Wilder's smoothed RSI of `prices` (oldest first).
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss.
/// Averages are seeded with the simple mean of the first `period` moves and
/// then smoothed with factor `1 / period`.
///
/// With no losses the RSI is 100. A window with no movement at all is
/// treated as RS = 1, giving 50. NaN or infinite prices are rejected.
pub fn compute_rsi(prices: &[f64], period: usize) -> Result<f64, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }
    if prices.len() <= period {
        return Err(IndicatorError::InsufficientData {
            required: period,
            actual: prices.len(),
        });
    }
    if let Some(index) = prices.iter().position(|p| !p.is_finite()) {
        return Err(IndicatorError::NonFinitePrice { index });
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    let n = period as f64;

    for (i, pair) in prices.windows(2).enumerate() {
        let change = pair[1] - pair[0];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if i < period {
            avg_gain += gain;
            avg_loss += loss;
            if i + 1 == period {
                avg_gain /= n;
                avg_loss /= n;
            }
        } else {
            avg_gain = (avg_gain * (n - 1.0) + gain) / n;
            avg_loss = (avg_loss * (n - 1.0) + loss) / n;
        }
    }

    if avg_loss == 0.0 {
        return Ok(if avg_gain == 0.0 { 50.0 } else { 100.0 });
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - (100.0 / (1.0 + rs)))
}

/// Calculate RSI over candle closes
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Result<RsiIndicator, IndicatorError> {
    let value = compute_rsi(&close_prices(candles), period)?;
    Ok(RsiIndicator { value, period })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Result<RsiIndicator, IndicatorError> {
    calculate_rsi(candles, DEFAULT_RSI_PERIOD)
}
