//! External collaborators: price source and chat notifier.

pub mod bybit;
pub mod discord;
pub mod market_data;
pub mod notifier;

pub use market_data::{FetchError, MarketDataProvider};
pub use notifier::{NotifyError, Notifier};
