#![allow(dead_code)]

//! In-memory fakes for the dispatcher's injected collaborators.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use daylog::ai::Summarizer;
use daylog::core::models::{Event, User, UserProfile};
use daylog::errors::BotError;
use daylog::store::{EventStore, UserStore};
use daylog::telegram::Replier;
use daylog::telegram::update::{Chat, Message, Sender, Update};

/// Insert-if-absent user store backed by a vec.
#[derive(Default)]
pub struct InMemoryUserStore {
    pub users: Mutex<Vec<User>>,
    fail: bool,
}

impl InMemoryUserStore {
    pub fn failing() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn ensure_user(&self, profile: &UserProfile) -> Result<User, BotError> {
        if self.fail {
            return Err(BotError::StoreError("store unreachable".to_string()));
        }

        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter().find(|u| u.tg_id == profile.tg_id) {
            return Ok(existing.clone());
        }

        let user = User {
            tg_id: profile.tg_id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            is_bot: profile.is_bot,
            username: profile.username.clone(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Append-only event store with the same closed-range query semantics as the
/// Mongo implementation.
#[derive(Default)]
pub struct InMemoryEventStore {
    pub events: Mutex<Vec<Event>>,
    fail: bool,
}

impl InMemoryEventStore {
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Seeds an event with an explicit timestamp, for boundary tests.
    pub fn push_at(&self, tg_id: i64, text: &str, created_at: DateTime<Utc>) {
        self.events.lock().unwrap().push(Event {
            id: None,
            tg_id,
            text: text.to_string(),
            created_at,
        });
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn record_event(&self, tg_id: i64, text: &str) -> Result<Event, BotError> {
        if self.fail {
            return Err(BotError::StoreError("store unreachable".to_string()));
        }

        let event = Event {
            id: None,
            tg_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn list_events_in_range(
        &self,
        tg_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, BotError> {
        if self.fail {
            return Err(BotError::StoreError("store unreachable".to_string()));
        }

        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| e.tg_id == tg_id && e.created_at >= start && e.created_at <= end)
            .cloned()
            .collect())
    }
}

/// Records every reply instead of talking to Telegram.
#[derive(Default)]
pub struct RecordingReplier {
    pub sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingReplier {
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Replier for RecordingReplier {
    async fn reply(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

/// Counts invocations and the payload size of each one.
#[derive(Default)]
pub struct StubSummarizer {
    pub payload_sizes: Mutex<Vec<usize>>,
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(
        &self,
        events: &[Event],
        _day: NaiveDate,
    ) -> Result<Option<String>, BotError> {
        self.payload_sizes.lock().unwrap().push(events.len());
        if events.is_empty() {
            Ok(None)
        } else {
            Ok(Some("stub digest".to_string()))
        }
    }
}

/// A text message update as the Bot API would deliver it.
pub fn text_update(update_id: i64, tg_id: i64, text: &str) -> Update {
    Update {
        update_id,
        message: Some(Message {
            message_id: update_id,
            from: Some(Sender {
                id: tg_id,
                is_bot: false,
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                username: Some("ada".to_string()),
            }),
            chat: Chat { id: tg_id },
            text: Some(text.to_string()),
        }),
    }
}
