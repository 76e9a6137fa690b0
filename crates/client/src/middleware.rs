//! The retrieval-augmentation middleware.
//!
//! One `RagMiddleware` instance serves the host pipeline. All network use
//! and every configuration read or write goes through a single exclusive
//! lock, so concurrent callers serialize on the one connection and
//! reconfiguration is atomic with respect to in-flight requests. There is
//! no pooling, no pipelining, no retry: a failed round trip is terminal
//! for that call.

use ragbridge_core::{RagConfig, RagError, RagResponse};
use serde_json::{Value, json};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::connector::Connection;
use crate::translate::translate_response;

const AUGMENT_ENDPOINT: &str = "/api/v1/llama/augment";
const HEALTH_ENDPOINT: &str = "/api/v1/llama/health";

/// Middleware between the chat pipeline and the external retrieval service.
pub struct RagMiddleware {
    inner: Mutex<Inner>,
}

/// Configuration and connection state, only ever touched under the lock.
struct Inner {
    config: RagConfig,
    connection: Option<Connection>,
}

impl RagMiddleware {
    /// Create the middleware. When enabled, the connection is built up
    /// front; a build failure is logged and requests fail until a later
    /// `update_config` succeeds.
    pub fn new(config: RagConfig) -> Self {
        let connection = if config.enabled {
            match Connection::build(&config) {
                Ok(conn) => {
                    info!(host = %config.host, port = config.port, "RAG middleware initialized");
                    Some(conn)
                }
                Err(e) => {
                    error!(error = %e, "Failed to initialize RAG connection");
                    None
                }
            }
        } else {
            info!("RAG middleware disabled");
            None
        };

        Self {
            inner: Mutex::new(Inner { config, connection }),
        }
    }

    /// Augment a user query with retrieved context.
    ///
    /// Every failure mode is returned as a failed [`RagResponse`]; latency
    /// is measured around the whole operation, success or failure. The
    /// disabled and empty-query branches return without any network call.
    pub async fn augment_query(&self, query: &str, session_id: Option<&str>) -> RagResponse {
        let start = Instant::now();

        let mut response = match self.try_augment(query, session_id).await {
            Ok(resp) => resp,
            Err(e) => {
                let message = match &e {
                    // Dispatcher failures collapse into one generic message;
                    // the specifics are already logged.
                    RagError::Transport(_) | RagError::Protocol { .. } => {
                        "Failed to get response from retrieval service".to_string()
                    }
                    _ => e.to_string(),
                };
                RagResponse::failure(message)
            }
        };

        response.latency_ms = start.elapsed().as_secs_f64() as f32 * 1000.0;
        response
    }

    async fn try_augment(
        &self,
        query: &str,
        session_id: Option<&str>,
    ) -> Result<RagResponse, RagError> {
        let inner = self.inner.lock().await;

        if !inner.config.enabled {
            return Err(RagError::Disabled);
        }
        if query.is_empty() {
            return Err(RagError::EmptyQuery);
        }

        let mut body = json!({
            "query": query,
            "max_results": inner.config.max_results,
            "similarity_threshold": inner.config.similarity_threshold,
            "include_tools": inner.config.include_tools,
        });
        // Never sent as an empty string.
        if let Some(session) = session_id.filter(|s| !s.is_empty()) {
            body["session_id"] = json!(session);
        }

        // The guard stays held across the round trip: concurrent callers
        // serialize on the one connection.
        let payload = post_json(&inner, AUGMENT_ENDPOINT, &body).await?;
        drop(inner);

        translate_response(payload)
    }

    /// Check whether the retrieval service is reachable and ready.
    ///
    /// Disabled middleware, transport failures, bad statuses, unparsable
    /// bodies, and a missing `ready` field all report `false` — a health
    /// probe never errors.
    pub async fn is_healthy(&self) -> bool {
        let inner = self.inner.lock().await;

        if !inner.config.enabled {
            return false;
        }

        match get_json(&inner, HEALTH_ENDPOINT).await {
            Ok(body) => body.get("ready").and_then(Value::as_bool).unwrap_or(false),
            Err(e) => {
                warn!(error = %e, "RAG health check failed");
                false
            }
        }
    }

    /// Replace the configuration wholesale.
    ///
    /// The connection is rebuilt (or dropped, when disabling) only if the
    /// raw `enabled`, `host`, or `port` values changed; soft fields like
    /// thresholds, counts, and the timeout take effect on the next request
    /// without a rebuild.
    pub async fn update_config(&self, config: RagConfig) {
        let mut inner = self.inner.lock().await;

        let need_rebuild = config.enabled != inner.config.enabled
            || config.host != inner.config.host
            || config.port != inner.config.port;

        inner.config = config;

        if need_rebuild {
            inner.connection = if inner.config.enabled {
                match Connection::build(&inner.config) {
                    Ok(conn) => Some(conn),
                    Err(e) => {
                        error!(error = %e, "Failed to rebuild RAG connection");
                        None
                    }
                }
            } else {
                None
            };
        }
    }

    /// Snapshot of the current configuration.
    pub async fn config(&self) -> RagConfig {
        self.inner.lock().await.config.clone()
    }
}

/// POST a JSON payload to a service endpoint through the held connection.
async fn post_json(inner: &Inner, endpoint: &str, body: &Value) -> Result<Value, RagError> {
    let Some(connection) = inner.connection.as_ref() else {
        warn!("HTTP client not initialized");
        return Err(RagError::Transport("connection not initialized".into()));
    };

    let response = connection
        .client()
        .post(connection.url(endpoint))
        .timeout(std::time::Duration::from_millis(inner.config.timeout_ms))
        .json(body)
        .send()
        .await
        .map_err(|e| {
            warn!(endpoint, error = %e, "HTTP request failed");
            RagError::Transport(e.to_string())
        })?;

    let status = response.status().as_u16();
    if !response.status().is_success() {
        warn!(endpoint, status, "HTTP request returned error status");
        return Err(RagError::Protocol { status });
    }

    response
        .json()
        .await
        .map_err(|e| RagError::Parse(e.to_string()))
}

/// GET a JSON payload from a service endpoint through the held connection.
async fn get_json(inner: &Inner, endpoint: &str) -> Result<Value, RagError> {
    let Some(connection) = inner.connection.as_ref() else {
        return Err(RagError::Transport("connection not initialized".into()));
    };

    let response = connection
        .client()
        .get(connection.url(endpoint))
        .timeout(std::time::Duration::from_millis(inner.config.timeout_ms))
        .send()
        .await
        .map_err(|e| RagError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    if !response.status().is_success() {
        return Err(RagError::Protocol { status });
    }

    response
        .json()
        .await
        .map_err(|e| RagError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_config() -> RagConfig {
        RagConfig {
            enabled: true,
            ..RagConfig::default()
        }
    }

    #[tokio::test]
    async fn disabled_returns_failure_without_network() {
        let mw = RagMiddleware::new(RagConfig::default());

        let resp = mw.augment_query("what is rust", None).await;

        assert!(!resp.success);
        assert_eq!(resp.error_message, "RAG disabled");
        assert!(resp.chunks.is_empty());
        // No network call happened, so the whole thing is near-instant.
        assert!(resp.latency_ms < 100.0);
    }

    #[tokio::test]
    async fn empty_query_returns_failure_without_network() {
        let mw = RagMiddleware::new(enabled_config());

        let resp = mw.augment_query("", Some("session-1")).await;

        assert!(!resp.success);
        assert_eq!(resp.error_message, "Empty query");
        assert!(resp.latency_ms < 100.0);
    }

    #[tokio::test]
    async fn disabled_middleware_is_never_healthy() {
        let mw = RagMiddleware::new(RagConfig::default());
        assert!(!mw.is_healthy().await);
    }

    #[tokio::test]
    async fn disabled_middleware_builds_no_connection() {
        let mw = RagMiddleware::new(RagConfig::default());
        assert!(mw.inner.lock().await.connection.is_none());
    }

    #[tokio::test]
    async fn enabled_middleware_builds_connection() {
        let mw = RagMiddleware::new(enabled_config());
        assert!(mw.inner.lock().await.connection.is_some());
    }

    #[tokio::test]
    async fn soft_field_update_keeps_config_and_skips_rebuild() {
        let mw = RagMiddleware::new(enabled_config());

        let mut updated = enabled_config();
        updated.max_results = 20;
        updated.similarity_threshold = 0.8;
        updated.timeout_ms = 250;
        mw.update_config(updated.clone()).await;

        assert_eq!(mw.config().await, updated);
        assert!(mw.inner.lock().await.connection.is_some());
    }

    #[tokio::test]
    async fn disabling_drops_the_connection() {
        let mw = RagMiddleware::new(enabled_config());

        mw.update_config(RagConfig::default()).await;

        assert!(mw.inner.lock().await.connection.is_none());
        let resp = mw.augment_query("query", None).await;
        assert_eq!(resp.error_message, "RAG disabled");
    }

    #[tokio::test]
    async fn enabling_builds_the_connection() {
        let mw = RagMiddleware::new(RagConfig::default());
        assert!(mw.inner.lock().await.connection.is_none());

        mw.update_config(enabled_config()).await;
        assert!(mw.inner.lock().await.connection.is_some());
    }
}
