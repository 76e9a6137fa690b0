//! Pure transcript-level algorithms for the ragbridge middleware.
//!
//! The host pipeline passes chat transcripts as raw OpenAI-style JSON
//! message arrays, so these functions operate on `serde_json::Value` and
//! treat malformed transcripts defensively (pass-through, never panic).
//! None of them touch the network or the middleware's lock.

pub mod format;
pub mod inject;
pub mod policy;

pub use format::format_rag_context;
pub use inject::inject_context_into_messages;
pub use policy::should_use_rag;
