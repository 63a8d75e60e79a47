use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use mongodb::Client;
use mongodb::bson::doc;
use tracing::{error, info};

use daylog::ai::OpenAiSummarizer;
use daylog::bot::Dispatcher;
use daylog::core::config::AppConfig;
use daylog::store::{MongoEventStore, MongoUserStore};
use daylog::telegram::TelegramClient;

#[tokio::main]
async fn main() -> Result<()> {
    daylog::setup_logging();

    let config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // An unreachable database at launch is fatal: bail out with a non-zero
    // exit status before touching the transport.
    let mongo = Client::with_uri_str(&config.mongodb_uri)
        .await
        .context("Failed to create MongoDB client")?;
    let db = mongo.database(config.database_name());
    db.run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB is unreachable")?;

    let users = MongoUserStore::new(&db);
    users
        .ensure_indexes()
        .await
        .context("Failed to create the users index")?;
    let events = MongoEventStore::new(&db);

    let telegram = Arc::new(TelegramClient::new(&config.telegram_bot_token)?);
    let summarizer =
        OpenAiSummarizer::new(config.openai_api_key.clone(), config.openai_model.clone());

    let dispatcher = Dispatcher::new(
        Arc::new(users),
        Arc::new(events),
        Arc::new(summarizer),
        telegram.clone(),
    );

    info!("daylog started, polling for updates");
    poll_updates(&dispatcher, &telegram).await;
    info!("daylog stopped");

    Ok(())
}

/// Long-poll loop. Updates are handled one at a time; the offset advances
/// past every update we received, handled or not, so a failing update is not
/// redelivered forever.
async fn poll_updates(dispatcher: &Dispatcher, telegram: &TelegramClient) {
    let mut offset: Option<i64> = None;

    loop {
        tokio::select! {
            _ = shutdown_signal() => {
                info!("Shutdown signal received, no longer accepting updates");
                break;
            }
            batch = telegram.get_updates(offset) => match batch {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        if let Err(e) = dispatcher.handle_update(&update).await {
                            error!("Failed to handle update {}: {}", update.update_id, e);
                        }
                    }
                }
                Err(e) => {
                    error!("Polling failed: {}", e);
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        }
    }
}

/// Resolves on SIGINT or SIGTERM, whichever arrives first.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = term.recv() => {}
                }
            }
            Err(_) => {
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }
}
