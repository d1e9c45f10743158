//! Wire types for the Bybit v5 kline endpoints

use chrono::DateTime;
use serde::Deserialize;

use crate::models::indicators::Candle;
use crate::services::market_data::FetchError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KlineResponse {
    pub ret_code: i64,
    #[serde(default)]
    pub ret_msg: String,
    #[serde(default)]
    pub result: Option<KlineResult>,
}

#[derive(Debug, Deserialize)]
pub struct KlineResult {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// `[startTime, open, high, low, close]`, newest first
    #[serde(default)]
    pub list: Vec<Vec<String>>,
}

impl KlineResponse {
    /// Validate the envelope and convert rows into candles, oldest first
    pub fn into_candles(self) -> Result<Vec<Candle>, FetchError> {
        if self.ret_code != 0 {
            return Err(FetchError::Api {
                code: self.ret_code,
                message: self.ret_msg,
            });
        }

        let result = self
            .result
            .ok_or_else(|| FetchError::Malformed("missing result".to_string()))?;

        let mut candles = result
            .list
            .iter()
            .map(|row| parse_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }
}

fn parse_row(row: &[String]) -> Result<Candle, FetchError> {
    if row.len() < 5 {
        return Err(FetchError::Malformed(format!(
            "kline row has {} fields, expected 5",
            row.len()
        )));
    }

    let start_ms: i64 = row[0]
        .parse()
        .map_err(|_| FetchError::Malformed(format!("invalid start time {:?}", row[0])))?;
    let timestamp = DateTime::from_timestamp_millis(start_ms)
        .ok_or_else(|| FetchError::Malformed(format!("start time out of range: {}", start_ms)))?;

    let price = |idx: usize, name: &str| -> Result<f64, FetchError> {
        let value: f64 = row[idx]
            .parse()
            .map_err(|_| FetchError::Malformed(format!("invalid {} price {:?}", name, row[idx])))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FetchError::Malformed(format!("non-finite {} price", name)))
        }
    };

    Ok(Candle::new(
        price(1, "open")?,
        price(2, "high")?,
        price(3, "low")?,
        price(4, "close")?,
        timestamp,
    ))
}
