use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// Sender profile as delivered by the chat transport. Fields other than the
/// identifier are whatever Telegram chose to share.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub tg_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
    pub username: Option<String>,
}

/// A stored user. One record per Telegram id; fields are written once at
/// first contact and never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub tg_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
    pub username: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// One recorded message. Append-only; the timestamp is assigned at write
/// time, never taken from the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub tg_id: i64,
    pub text: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}
