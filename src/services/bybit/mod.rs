//! Bybit v5 market data over REST

pub mod client;
pub mod messages;

pub use client::{BybitRestClient, RetryPolicy};
