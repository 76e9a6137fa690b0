//! Connection construction toward the retrieval service.
//!
//! The connection target is derived from configuration alone. A scheme-
//! qualified host addresses a reverse proxy that routes internally, so the
//! scheme's default port overrides whatever numeric port is configured.

use ragbridge_core::{RagConfig, RagError};
use std::time::Duration;
use tracing::{info, warn};

/// Resolved connection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub host: String,
    pub port: u16,
    pub use_https: bool,
}

impl Target {
    /// Derive the target from the configured host and port.
    ///
    /// `https://` and `http://` prefixes are stripped and force ports 443
    /// and 80 respectively; a trailing slash is stripped; a bare host keeps
    /// the configured port.
    pub fn from_config(config: &RagConfig) -> Self {
        let mut host = config.host.as_str();
        let mut use_https = false;
        let mut port = config.port;

        if let Some(stripped) = host.strip_prefix("https://") {
            host = stripped;
            use_https = true;
            port = 443;
        } else if let Some(stripped) = host.strip_prefix("http://") {
            host = stripped;
            port = 80;
        }

        let host = host.strip_suffix('/').unwrap_or(host).to_string();

        Self {
            host,
            port,
            use_https,
        }
    }
}

/// A live connection handle: one HTTP client plus the resolved base URL.
///
/// Built under the middleware's exclusive lock and replaced atomically on
/// identity-changing reconfiguration. Peer certificates are verified against
/// the bundled trust roots whenever TLS is in play; verification is never
/// disabled.
pub(crate) struct Connection {
    client: reqwest::Client,
    base_url: String,
}

impl Connection {
    /// Build a connection from configuration.
    ///
    /// When the config asks for HTTPS but the crate was compiled without the
    /// `tls` feature, the connection degrades to plaintext on the already
    /// derived host and port, with a logged warning.
    pub fn build(config: &RagConfig) -> Result<Self, RagError> {
        let target = Target::from_config(config);

        let use_https = if target.use_https && !cfg!(feature = "tls") {
            warn!("HTTPS requested but TLS support not compiled in, using plaintext transport");
            false
        } else {
            target.use_https
        };

        let scheme = if use_https { "https" } else { "http" };
        let base_url = format!("{}://{}:{}", scheme, target.host, target.port);

        info!(target = %base_url, "RAG connecting");

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RagError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Full URL for a service endpoint path.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}
