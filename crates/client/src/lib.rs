//! Retrieval service client for the ragbridge middleware.
//!
//! [`RagMiddleware`] owns one connection to the external retrieval service
//! plus the current configuration, both behind a single exclusive lock.
//! It executes augmentation round trips, health checks, and thread-safe
//! reconfiguration, and contains every failure mode as a failed
//! [`RagResponse`](ragbridge_core::RagResponse) — nothing crosses its
//! boundary as a panic or an unhandled error.

mod connector;
mod middleware;
mod translate;

pub use middleware::RagMiddleware;
