//! RSI alert service for a single Bybit trading pair.
//!
//! Polls hourly candles, computes Wilder's RSI over the closes and posts a
//! Discord message whenever the value leaves the neutral band.

pub mod config;
pub mod core;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
