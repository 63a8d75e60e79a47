//! Daylog - a Telegram bot that keeps a log of your day and asks an AI for a
//! digest on demand.
//!
//! Every plain-text message a user sends is recorded as an event. `/start`
//! registers the user, `/generate` looks up the current day's events and
//! hands them to a chat-completion model for a digest.
//!
//! # Architecture
//!
//! The system uses:
//! - A long-polling Telegram Bot API client over reqwest
//! - MongoDB for the `users` and `events` collections
//! - openai-api-rs for digest generation
//! - Tokio for the async runtime
//!
//! All handlers live behind the [`bot::Dispatcher`], which takes its stores,
//! summarizer, and reply transport as injected trait objects.

// Module declarations
pub mod ai;
pub mod bot;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod store;
pub mod telegram;

/// Configure structured logging to stdout.
///
/// Call once at process start; handlers log through `tracing` macros.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
