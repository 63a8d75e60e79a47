use chrono::NaiveDate;

use crate::core::models::Event;

/// System role for digest generation. Kept deliberately short; the events
/// themselves carry all the context the model needs.
pub const DIGEST_SYSTEM_PROMPT: &str = "You are Daylog, an assistant that writes a short digest of a user's day \
     from the notes they logged. Provide only the digest, group related notes \
     together, and never invent activities that are not in the notes.";

/// Builds the user-role prompt for a day's digest: the date plus every
/// logged note with its time of day.
pub fn build_digest_prompt(events: &[Event], day: NaiveDate) -> String {
    let lines: Vec<String> = events
        .iter()
        .map(|event| format!("[{}] {}", event.created_at.format("%H:%M"), event.text))
        .collect();

    format!(
        "Summarize the following notes the user logged on {} in a clear, readable format. \
         Focus on what was done and organize by topic where appropriate:\n\n{}",
        day.format("%Y-%m-%d"),
        lines.join("\n")
    )
}
