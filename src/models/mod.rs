//! Shared data models.

pub mod indicators;

pub use indicators::{Candle, RsiIndicator, RsiZone};
