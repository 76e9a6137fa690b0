//! Policy gate: should this request attempt augmentation at all?

use serde_json::Value;

/// Decide whether a chat request should go through RAG augmentation.
///
/// A boolean `rag_enabled` in `params` is authoritative and short-circuits
/// every other check. Otherwise the transcript must be a non-empty array
/// containing at least one `"user"` turn — system-only transcripts are
/// never augmented.
pub fn should_use_rag(messages: &Value, params: &Value) -> bool {
    if let Some(enabled) = params.get("rag_enabled").and_then(Value::as_bool) {
        return enabled;
    }

    let Some(messages) = messages.as_array() else {
        return false;
    };
    if messages.is_empty() {
        return false;
    }

    messages
        .iter()
        .any(|msg| msg.get("role").and_then(Value::as_str) == Some("user"))
}
