use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::errors::BotError;
use crate::telegram::Replier;
use crate::telegram::update::Update;

/// How long a `getUpdates` call is allowed to hold the connection open.
pub const POLL_TIMEOUT_SECS: u64 = 30;

// The HTTP timeout must outlast the long poll itself.
const HTTP_TIMEOUT_SECS: u64 = POLL_TIMEOUT_SECS + 10;

/// Envelope every Bot API method responds with.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Thin Telegram Bot API client: long-poll updates in, messages out.
pub struct TelegramClient {
    http: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| BotError::HttpError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: format!("https://api.telegram.org/bot{}", token),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> Result<T, BotError> {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(BotError::TelegramError(format!(
                "{} failed: HTTP {} - {}",
                method, status, text
            )));
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.ok {
            return Err(BotError::TelegramError(format!(
                "{} failed: {}",
                method,
                envelope.description.unwrap_or_else(|| "unknown".to_string())
            )));
        }

        envelope.result.ok_or_else(|| {
            BotError::TelegramError(format!("{} returned ok without a result", method))
        })
    }

    /// Long-polls for the next batch of message updates. `offset` must be one
    /// past the last update id already handled.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, BotError> {
        let mut body = json!({
            "timeout": POLL_TIMEOUT_SECS,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }

        let updates: Vec<Update> = self.call("getUpdates", &body).await?;
        if !updates.is_empty() {
            debug!("Received {} update(s)", updates.len());
        }
        Ok(updates)
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        let body = json!({ "chat_id": chat_id, "text": text });
        // sendMessage echoes the Message back; nothing here needs it.
        let _: Value = self.call("sendMessage", &body).await?;
        Ok(())
    }
}

#[async_trait]
impl Replier for TelegramClient {
    async fn reply(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        self.send_message(chat_id, text).await
    }
}
