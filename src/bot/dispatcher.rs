use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{debug, error, info};

use crate::ai::Summarizer;
use crate::errors::BotError;
use crate::store::{EventStore, UserStore};
use crate::telegram::Replier;
use crate::telegram::update::{Command, Sender, Update};

/// Every text the bot ever sends. One place so tests and handlers agree.
pub mod replies {
    pub const WELCOME: &str =
        "Welcome to Daylog! Send me what you're up to and I'll keep a log of your day.";
    pub const START_APOLOGY: &str = "An error occurred";
    pub const NO_EVENTS: &str = "No events found";
    pub const EVENTS_FOUND: &str = "Events found and noted";
    pub const FETCH_APOLOGY: &str = "An error occurred while fetching events";
    pub const TEXT_ACK: &str = "Got the message and noted";
    pub const SAVE_APOLOGY: &str = "An error occurred while saving the message";
}

/// Inclusive UTC bounds of the calendar day containing `now`, local clock:
/// 00:00:00.000 through 23:59:59.999.
pub fn day_bounds(now: DateTime<Local>) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = now.date_naive();
    // Constant wall-clock times; construction cannot fail.
    let start = day.and_hms_milli_opt(0, 0, 0, 0).unwrap();
    let end = day.and_hms_milli_opt(23, 59, 59, 999).unwrap();

    // A DST transition can make a local wall-clock time ambiguous or absent;
    // fall back to `now` rather than guess.
    let start = Local
        .from_local_datetime(&start)
        .earliest()
        .unwrap_or(now)
        .with_timezone(&Utc);
    let end = Local
        .from_local_datetime(&end)
        .latest()
        .unwrap_or(now)
        .with_timezone(&Utc);

    (start, end)
}

/// Routes one inbound update to its handler. Holds no state of its own; all
/// collaborators are injected so handlers can be tested in isolation.
pub struct Dispatcher {
    users: Arc<dyn UserStore>,
    events: Arc<dyn EventStore>,
    summarizer: Arc<dyn Summarizer>,
    replier: Arc<dyn Replier>,
}

impl Dispatcher {
    pub fn new(
        users: Arc<dyn UserStore>,
        events: Arc<dyn EventStore>,
        summarizer: Arc<dyn Summarizer>,
        replier: Arc<dyn Replier>,
    ) -> Self {
        Self {
            users,
            events,
            summarizer,
            replier,
        }
    }

    /// Handles one update end to end. Store and provider failures are
    /// resolved here (apology reply or log); only reply delivery errors
    /// propagate to the caller.
    pub async fn handle_update(&self, update: &Update) -> Result<(), BotError> {
        let Some(message) = update.message.as_ref() else {
            return Ok(());
        };
        let Some(sender) = message.from.as_ref() else {
            return Ok(());
        };
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };
        let chat_id = message.chat.id;

        // Commands match before the plain-text fallback; a recognized
        // command is never recorded as an event.
        match Command::parse(text) {
            Some(Command::Start) => self.handle_start(chat_id, sender).await,
            Some(Command::Generate) => self.handle_generate(chat_id, sender.id).await,
            None => self.handle_text(chat_id, sender.id, text).await,
        }
    }

    async fn handle_start(&self, chat_id: i64, sender: &Sender) -> Result<(), BotError> {
        match self.users.ensure_user(&sender.into()).await {
            Ok(user) => {
                debug!("Start from tg_id {}", user.tg_id);
                self.replier.reply(chat_id, replies::WELCOME).await
            }
            Err(e) => {
                error!("Failed to ensure user {}: {}", sender.id, e);
                self.replier.reply(chat_id, replies::START_APOLOGY).await
            }
        }
    }

    async fn handle_generate(&self, chat_id: i64, tg_id: i64) -> Result<(), BotError> {
        let now = Local::now();
        let (start, end) = day_bounds(now);

        let events = match self.events.list_events_in_range(tg_id, start, end).await {
            Ok(events) => events,
            Err(e) => {
                error!("Failed to fetch events for {}: {}", tg_id, e);
                return self.replier.reply(chat_id, replies::FETCH_APOLOGY).await;
            }
        };

        if events.is_empty() {
            self.replier.reply(chat_id, replies::NO_EVENTS).await?;
        } else {
            self.replier.reply(chat_id, replies::EVENTS_FOUND).await?;
        }

        // Best-effort digest: the outcome is logged, never sent to the user.
        match self.summarizer.summarize(&events, now.date_naive()).await {
            Ok(Some(digest)) => info!("Generated digest for {}: {} chars", tg_id, digest.len()),
            Ok(None) => debug!("No events to summarize for {}", tg_id),
            Err(e) => error!("Failed to generate digest for {}: {}", tg_id, e),
        }

        Ok(())
    }

    async fn handle_text(&self, chat_id: i64, tg_id: i64, text: &str) -> Result<(), BotError> {
        match self.events.record_event(tg_id, text).await {
            Ok(_) => self.replier.reply(chat_id, replies::TEXT_ACK).await,
            Err(e) => {
                error!("Failed to record event for {}: {}", tg_id, e);
                self.replier.reply(chat_id, replies::SAVE_APOLOGY).await
            }
        }
    }
}
