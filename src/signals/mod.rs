//! Turning indicator values into alert decisions.

pub mod threshold;

pub use threshold::{alert_message, RsiThresholds, ThresholdError};
