use chrono::{NaiveDate, TimeZone, Utc};

use daylog::ai::{OpenAiSummarizer, Summarizer};
use daylog::core::models::Event;
use daylog::prompt::{DIGEST_SYSTEM_PROMPT, build_digest_prompt};

fn event_at(hour: u32, minute: u32, text: &str) -> Event {
    Event {
        id: None,
        tg_id: 42,
        text: text.to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 8, 30, hour, minute, 0).unwrap(),
    }
}

#[test]
fn test_digest_prompt_contains_every_event_and_the_date() {
    let events = vec![
        event_at(8, 15, "walked the dog"),
        event_at(12, 30, "lunch with Sam"),
        event_at(19, 5, "fixed the bike"),
    ];
    let day = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

    let prompt = build_digest_prompt(&events, day);

    assert!(prompt.contains("2026-08-30"));
    for event in &events {
        assert!(prompt.contains(&event.text), "missing: {}", event.text);
    }
    // Each note is prefixed with its time of day.
    assert!(prompt.contains("[08:15] walked the dog"));
    assert!(prompt.contains("[19:05] fixed the bike"));
}

#[test]
fn test_system_prompt_pins_the_digest_contract() {
    assert!(DIGEST_SYSTEM_PROMPT.contains("digest"));
    assert!(DIGEST_SYSTEM_PROMPT.contains("never invent"));
}

#[tokio::test]
async fn test_empty_events_short_circuit_without_a_remote_call() {
    // No network happens on the empty path, so a dummy key is safe here.
    let summarizer = OpenAiSummarizer::new("test-key".to_string(), None);
    let day = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

    let digest = summarizer.summarize(&[], day).await.unwrap();
    assert!(digest.is_none());
}
