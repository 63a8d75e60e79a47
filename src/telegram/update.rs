use serde::Deserialize;

use crate::core::models::UserProfile;

/// One entry from the Bot API `getUpdates` result. Only message updates are
/// requested; anything else deserializes with `message: None` and is skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<Sender>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// The `from` field of a Telegram message.
#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl From<&Sender> for UserProfile {
    fn from(sender: &Sender) -> Self {
        UserProfile {
            tg_id: sender.id,
            first_name: sender.first_name.clone(),
            last_name: sender.last_name.clone(),
            is_bot: sender.is_bot,
            username: sender.username.clone(),
        }
    }
}

/// Bot commands this process understands. Everything else is treated as a
/// plain-text message and recorded as an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Generate,
}

impl Command {
    /// Parses the leading token of a message as a bot command, tolerating the
    /// `/command@BotName` form Telegram uses in group chats and any trailing
    /// arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use daylog::telegram::Command;
    ///
    /// assert_eq!(Command::parse("/start"), Some(Command::Start));
    /// assert_eq!(Command::parse("/generate@DaylogBot now"), Some(Command::Generate));
    /// assert_eq!(Command::parse("buy milk"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Command> {
        let first = text.trim().split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        match name {
            "start" => Some(Command::Start),
            "generate" => Some(Command::Generate),
            _ => None,
        }
    }
}
