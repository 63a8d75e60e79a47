//! Persistence layer: two MongoDB collections, `users` and `events`.
//!
//! Handlers depend on the [`UserStore`] and [`EventStore`] traits so they can
//! be exercised against in-memory fakes; the Mongo-backed implementations
//! live in the submodules.

pub mod events;
pub mod users;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::models::{Event, User, UserProfile};
use crate::errors::BotError;

pub use events::MongoEventStore;
pub use users::MongoUserStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Idempotent insert-if-absent. The first call for an identifier creates
    /// the record from `profile`; later calls return the stored record
    /// unchanged, ignoring the supplied fields.
    async fn ensure_user(&self, profile: &UserProfile) -> Result<User, BotError>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Unconditional insert with a server-assigned timestamp.
    async fn record_event(&self, tg_id: i64, text: &str) -> Result<Event, BotError>;

    /// All events owned by `tg_id` with `start <= created_at <= end`, in
    /// insertion order. An empty day yields an empty vec, not an error.
    async fn list_events_in_range(
        &self,
        tg_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, BotError>;
}
