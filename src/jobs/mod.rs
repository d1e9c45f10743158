//! One evaluation cycle: fetch closes, compute RSI, classify, notify

pub mod context;
pub mod handlers;
pub mod types;

pub use context::{CycleSettings, JobContext};
pub use handlers::run_cycle;
pub use types::{CycleError, CycleOutcome};
