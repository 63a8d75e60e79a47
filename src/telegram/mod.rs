//! Telegram Bot API boundary: wire types, command parsing, and a thin
//! HTTP client for long polling and replies.

pub mod client;
pub mod update;

use async_trait::async_trait;

use crate::errors::BotError;

pub use client::{POLL_TIMEOUT_SECS, TelegramClient};
pub use update::{Chat, Command, Message, Sender, Update};

/// Outbound side of the transport. Handlers reply through this trait so they
/// can be tested without a network.
#[async_trait]
pub trait Replier: Send + Sync {
    async fn reply(&self, chat_id: i64, text: &str) -> Result<(), BotError>;
}
