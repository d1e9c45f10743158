pub mod error;
pub mod momentum;

pub use error::IndicatorError;
pub use momentum::{calculate_rsi, calculate_rsi_default, compute_rsi};
