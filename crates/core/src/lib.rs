//! # ragbridge Core
//!
//! Domain types, configuration, and error definitions for the ragbridge
//! retrieval-augmentation middleware. This crate carries no network or
//! runtime dependencies — it defines the value types that the client and
//! context crates operate on.

pub mod config;
pub mod error;
pub mod response;

// Re-export key types at crate root for ergonomics
pub use config::RagConfig;
pub use error::{RagError, Result};
pub use response::{ContextChunk, RagResponse};
