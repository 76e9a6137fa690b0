//! Error types for the ragbridge middleware.
//!
//! Uses `thiserror` for ergonomic error definitions. Every variant is
//! eventually flattened into a failed [`RagResponse`](crate::RagResponse)
//! at the middleware boundary — nothing propagates to the host as a panic
//! or an unhandled fault.

use thiserror::Error;

/// Failure modes of one augmentation or health-check round trip.
#[derive(Debug, Clone, Error)]
pub enum RagError {
    /// The feature is switched off in configuration. No network attempted.
    #[error("RAG disabled")]
    Disabled,

    /// The caller passed an empty query. No network attempted.
    #[error("Empty query")]
    EmptyQuery,

    /// No response at all: connection refused, DNS failure, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The retrieval service answered with a non-2xx status.
    #[error("Retrieval service returned status {status}")]
    Protocol { status: u16 },

    /// The response body could not be mapped into the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Anything else caught at the orchestrator boundary.
    #[error("Internal exception: {0}")]
    Internal(String),
}

/// Result type alias using our error.
pub type Result<T> = std::result::Result<T, RagError>;
