//! Augmentation result value types.
//!
//! A [`RagResponse`] is the typed outcome of one augmentation attempt.
//! Exactly one of two shapes holds: success with populated fields, or
//! failure with an error message and no chunks — never a mix.

use serde::{Deserialize, Serialize};

/// One retrieved context passage with provenance and a similarity score.
///
/// Produced only by the client's response translation; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextChunk {
    /// Passage text.
    pub content: String,
    /// Provenance label (document name, URL, collection id).
    pub source: String,
    /// Similarity score reported by the retrieval service.
    pub similarity: f32,
}

/// Result of one augmentation round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResponse {
    /// Pre-rendered context from the service. May be empty even on success.
    pub augmented_context: String,

    /// Retrieved chunks, in service ranking order.
    pub chunks: Vec<ContextChunk>,

    /// Names of tools the service suggests for this query.
    pub suggested_tools: Vec<String>,

    /// Measured latency of the whole call in milliseconds. Always populated,
    /// success or failure.
    pub latency_ms: f32,

    /// Whether the augmentation succeeded.
    pub success: bool,

    /// Error message; non-empty iff `success` is false.
    pub error_message: String,
}

impl RagResponse {
    /// A failed response carrying only a message. Latency is filled in by
    /// the orchestrator before the value is returned.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            augmented_context: String::new(),
            chunks: Vec::new(),
            suggested_tools: Vec::new(),
            latency_ms: 0.0,
            success: false,
            error_message: message.into(),
        }
    }

    /// A successful response with translated fields.
    pub fn success(
        augmented_context: String,
        chunks: Vec<ContextChunk>,
        suggested_tools: Vec<String>,
        latency_ms: f32,
    ) -> Self {
        Self {
            augmented_context,
            chunks,
            suggested_tools,
            latency_ms,
            success: true,
            error_message: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_has_no_data() {
        let resp = RagResponse::failure("RAG disabled");
        assert!(!resp.success);
        assert_eq!(resp.error_message, "RAG disabled");
        assert!(resp.chunks.is_empty());
        assert!(resp.suggested_tools.is_empty());
        assert!(resp.augmented_context.is_empty());
    }

    #[test]
    fn success_has_no_error() {
        let chunk = ContextChunk {
            content: "Rust is a systems language".into(),
            source: "docs/intro.md".into(),
            similarity: 0.92,
        };
        let resp = RagResponse::success("ctx".into(), vec![chunk], vec!["search".into()], 12.5);
        assert!(resp.success);
        assert!(resp.error_message.is_empty());
        assert_eq!(resp.chunks.len(), 1);
        assert_eq!(resp.latency_ms, 12.5);
    }

    #[test]
    fn chunk_serialization_roundtrip() {
        let chunk = ContextChunk {
            content: "passage".into(),
            source: "unknown".into(),
            similarity: 0.5,
        };
        let json = serde_json::to_string(&chunk).unwrap();
        let parsed: ContextChunk = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, chunk);
    }
}
