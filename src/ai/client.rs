use async_trait::async_trait;
use chrono::NaiveDate;
use openai_api_rs::v1::api::OpenAIClient;
use openai_api_rs::v1::chat_completion::{
    ChatCompletionMessage, ChatCompletionRequest, Content, MessageRole,
};
use openai_api_rs::v1::common::GPT4_O;
use tracing::info;

use crate::ai::Summarizer;
use crate::core::models::Event;
use crate::errors::BotError;
use crate::prompt::{DIGEST_SYSTEM_PROMPT, build_digest_prompt};

// Cap output length; a day's digest has no business being longer than this.
const MAX_OUTPUT_TOKENS: i64 = 500;

/// Chat-completion backed digest generator.
pub struct OpenAiSummarizer {
    api_key: String,
    model: String,
}

impl OpenAiSummarizer {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            api_key,
            model: model.unwrap_or_else(|| GPT4_O.to_string()),
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(
        &self,
        events: &[Event],
        day: NaiveDate,
    ) -> Result<Option<String>, BotError> {
        if events.is_empty() {
            return Ok(None);
        }

        let prompt = build_digest_prompt(events, day);

        #[cfg(feature = "debug-logs")]
        info!("Digest prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Requesting digest of {} event(s) for {}",
            events.len(),
            day
        );

        let chat_req = ChatCompletionRequest::new(
            self.model.clone(),
            vec![
                ChatCompletionMessage {
                    role: MessageRole::system,
                    content: Content::Text(DIGEST_SYSTEM_PROMPT.to_string()),
                    name: None,
                    tool_calls: None,
                    tool_call_id: None,
                },
                ChatCompletionMessage {
                    role: MessageRole::user,
                    content: Content::Text(prompt),
                    name: None,
                    tool_calls: None,
                    tool_call_id: None,
                },
            ],
        )
        .temperature(0.3)
        .max_tokens(MAX_OUTPUT_TOKENS);

        let mut client = OpenAIClient::builder()
            .with_api_key(self.api_key.clone())
            .build()
            .map_err(|e| BotError::ProviderError(format!("Failed to create OpenAI client: {}", e)))?;

        let result = client.chat_completion(chat_req).await?;

        let digest = result
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| BotError::ProviderError("No content in completion".to_string()))?;

        Ok(Some(digest))
    }
}
