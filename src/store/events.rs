use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use tracing::debug;

use crate::core::models::Event;
use crate::errors::BotError;
use crate::store::EventStore;

pub const EVENTS_COLLECTION: &str = "events";

/// `events` collection access. Append-only; nothing in this process updates
/// or deletes event documents.
pub struct MongoEventStore {
    collection: Collection<Event>,
}

impl MongoEventStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(EVENTS_COLLECTION),
        }
    }
}

#[async_trait]
impl EventStore for MongoEventStore {
    async fn record_event(&self, tg_id: i64, text: &str) -> Result<Event, BotError> {
        let mut event = Event {
            id: None,
            tg_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };

        let result = self.collection.insert_one(&event).await?;
        event.id = result.inserted_id.as_object_id();

        debug!("Recorded event for tg_id {}", tg_id);
        Ok(event)
    }

    async fn list_events_in_range(
        &self,
        tg_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, BotError> {
        // Closed range on both ends; an event at exactly midnight belongs to
        // the day that starts there.
        let filter = doc! {
            "tg_id": tg_id,
            "created_at": {
                "$gte": mongodb::bson::DateTime::from_chrono(start),
                "$lte": mongodb::bson::DateTime::from_chrono(end),
            },
        };

        let events: Vec<Event> = self.collection.find(filter).await?.try_collect().await?;
        Ok(events)
    }
}
