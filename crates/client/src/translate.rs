//! Defensive translation of the raw augment payload.
//!
//! Missing fields get named defaults; present fields with the wrong type
//! fail the whole translation, and any partially collected data is
//! discarded rather than returned half-populated.

use ragbridge_core::{ContextChunk, RagError, RagResponse};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Deserialize)]
struct RawAugmentResponse {
    #[serde(default)]
    augmented_context: String,

    /// Service-reported latency. The orchestrator overwrites this with the
    /// measured whole-call latency before returning.
    #[serde(default)]
    latency_ms: f32,

    #[serde(default)]
    chunks: Vec<RawChunk>,

    /// Tool suggestions arrive as arbitrary JSON; only plain strings are
    /// kept, everything else is silently skipped.
    #[serde(default)]
    suggested_tools: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawChunk {
    #[serde(default)]
    content: String,

    #[serde(default = "default_source")]
    source: String,

    #[serde(default)]
    similarity: f32,
}

fn default_source() -> String {
    "unknown".into()
}

/// Map a raw augment payload into a typed [`RagResponse`].
pub(crate) fn translate_response(body: Value) -> Result<RagResponse, RagError> {
    let raw: RawAugmentResponse =
        serde_json::from_value(body).map_err(|e| RagError::Parse(e.to_string()))?;

    let chunks: Vec<ContextChunk> = raw
        .chunks
        .into_iter()
        .map(|c| ContextChunk {
            content: c.content,
            source: c.source,
            similarity: c.similarity,
        })
        .collect();

    let suggested_tools: Vec<String> = raw
        .suggested_tools
        .into_iter()
        .filter_map(|t| t.as_str().map(String::from))
        .collect();

    info!(
        chunks = chunks.len(),
        service_latency_ms = raw.latency_ms,
        "RAG response translated"
    );

    Ok(RagResponse::success(
        raw.augmented_context,
        chunks,
        suggested_tools,
        raw.latency_ms,
    ))
}
