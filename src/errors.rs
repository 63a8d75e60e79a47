use openai_api_rs::v1::error::APIError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to access the store: {0}")]
    StoreError(String),

    #[error("Failed to access the AI provider: {0}")]
    ProviderError(String),

    #[error("Failed to access the Telegram API: {0}")]
    TelegramError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to parse update payload: {0}")]
    ParseError(String),
}

impl From<mongodb::error::Error> for BotError {
    fn from(error: mongodb::error::Error) -> Self {
        BotError::StoreError(error.to_string())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::ParseError(error.to_string())
    }
}

impl From<APIError> for BotError {
    fn from(error: APIError) -> Self {
        BotError::ProviderError(format!("OpenAI API error: {}", error))
    }
}
