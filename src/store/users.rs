use async_trait::async_trait;
use chrono::Utc;
use mongodb::Database;
use mongodb::bson::doc;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use tracing::debug;

use crate::core::models::{User, UserProfile};
use crate::errors::BotError;
use crate::store::UserStore;

pub const USERS_COLLECTION: &str = "users";

/// `users` collection access. First-contact races are resolved by the unique
/// index on `tg_id`, not by application-level locking.
pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(USERS_COLLECTION),
        }
    }

    /// Creates the unique `tg_id` index. Called once at startup; a failure
    /// here is a startup failure.
    pub async fn ensure_indexes(&self) -> Result<(), BotError> {
        let index = IndexModel::builder()
            .keys(doc! { "tg_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn ensure_user(&self, profile: &UserProfile) -> Result<User, BotError> {
        let update = doc! {
            "$setOnInsert": {
                "tg_id": profile.tg_id,
                "first_name": profile.first_name.clone(),
                "last_name": profile.last_name.clone(),
                "is_bot": profile.is_bot,
                "username": profile.username.clone(),
                "created_at": mongodb::bson::DateTime::from_chrono(Utc::now()),
            }
        };

        let user = self
            .collection
            .find_one_and_update(doc! { "tg_id": profile.tg_id }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| {
                BotError::StoreError("upsert returned no document".to_string())
            })?;

        debug!("Ensured user record for tg_id {}", user.tg_id);
        Ok(user)
    }
}
