//! Rendering retrieved chunks into one injectable context block.

use ragbridge_core::ContextChunk;

/// Render a chunk list into the textual context block injected ahead of the
/// user query.
///
/// Empty input yields an empty string, which signals "nothing to inject"
/// and lets the caller fall back to the date note. Chunks are rendered in
/// input order with 1-based source numbering.
pub fn format_rag_context(chunks: &[ContextChunk]) -> String {
    if chunks.is_empty() {
        return String::new();
    }

    let mut out = String::from("[Retrieved Context]\n");

    for (i, chunk) in chunks.iter().enumerate() {
        out.push_str(&format!(
            "\n[Source {}: {} (relevance: {})]\n",
            i + 1,
            chunk.source,
            chunk.similarity
        ));
        out.push_str(&chunk.content);
        out.push('\n');
    }

    out.push_str("\n[End Retrieved Context]\n");

    out
}
