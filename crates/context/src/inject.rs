//! Context injection into a chat transcript.

use chrono::Local;
use serde_json::Value;

/// Merge an injection string into the most recent user turn of a transcript.
///
/// When `rag_context` is empty (nothing retrieved, or augmentation failed),
/// a date note is injected instead so the model still receives the current
/// date: `[System Note] Current date: YYYY-MM-DD`.
///
/// The transcript is scanned from the last turn backward; the first turn
/// with `role == "user"` has its content rewritten to
/// `injection + "\n\nUser Query: " + original`. All other turns are left
/// exactly as given. A transcript with no user turn, or one that is not a
/// JSON array, is returned unchanged.
///
/// Pure function — returns a new transcript value.
pub fn inject_context_into_messages(messages: &Value, rag_context: &str) -> Value {
    let injection = if rag_context.is_empty() {
        format!(
            "[System Note] Current date: {}",
            Local::now().format("%Y-%m-%d")
        )
    } else {
        rag_context.to_string()
    };

    let Some(turns) = messages.as_array() else {
        return messages.clone();
    };

    let mut modified = turns.clone();

    for turn in modified.iter_mut().rev() {
        if turn.get("role").and_then(Value::as_str) == Some("user") {
            let original = turn.get("content").and_then(Value::as_str).unwrap_or("");
            turn["content"] = Value::String(format!("{injection}\n\nUser Query: {original}"));
            break;
        }
    }

    Value::Array(modified)
}
