//! Discord bot notifier over the REST API

pub mod client;

pub use client::{BotUser, DiscordNotifier};
