use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub openai_api_key: String,
    pub mongodb_uri: String,
    pub mongodb_database: Option<String>,
    pub openai_model: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .map_err(|e| format!("TELEGRAM_BOT_TOKEN: {}", e))?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|e| format!("OPENAI_API_KEY: {}", e))?,
            mongodb_uri: env::var("MONGODB_URI").map_err(|e| format!("MONGODB_URI: {}", e))?,
            mongodb_database: env::var("MONGODB_DATABASE").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
        })
    }

    pub fn database_name(&self) -> &str {
        self.mongodb_database.as_deref().unwrap_or("daylog")
    }
}
