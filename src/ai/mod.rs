//! AI provider boundary. The digest feature is best-effort: failures are
//! logged by the caller and never surfaced to the end user.

pub mod client;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::models::Event;
use crate::errors::BotError;

pub use client::OpenAiSummarizer;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produces a natural-language digest of `events` for the given day, or
    /// `None` without touching the remote model when there is nothing to
    /// summarize.
    async fn summarize(&self, events: &[Event], day: NaiveDate)
    -> Result<Option<String>, BotError>;
}
