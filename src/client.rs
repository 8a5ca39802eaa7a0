//! High-level client — `AnalyticsClient` with sub-client accessors.
//!
//! The analysis sub-client lives in `domain/analysis/client.rs`. This module
//! keeps the builder and the accessors.

use crate::conversation::Conversation;
use crate::domain::analysis::client::Analysis;
use crate::error::SdkError;
use crate::http::AnalyticsHttp;
use crate::network::{DEFAULT_API_URL, DEFAULT_TIMEOUT};

use std::time::Duration;

pub use crate::domain::analysis::client::Analysis as AnalysisClient;

/// The primary entry point for the SDK.
#[derive(Clone)]
pub struct AnalyticsClient {
    pub(crate) http: AnalyticsHttp,
}

impl AnalyticsClient {
    pub fn builder() -> AnalyticsClientBuilder {
        AnalyticsClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn analysis(&self) -> Analysis<'_> {
        Analysis { client: self }
    }

    /// Start a new, empty conversation backed by this client's HTTP layer.
    ///
    /// Each call returns an independent session.
    pub fn conversation(&self) -> Conversation<AnalyticsHttp> {
        Conversation::new(self.http.clone())
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct AnalyticsClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl Default for AnalyticsClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AnalyticsClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<AnalyticsClient, SdkError> {
        tracing::debug!(base_url = %self.base_url, timeout_ms = self.timeout.as_millis() as u64, "Building client");
        Ok(AnalyticsClient {
            http: AnalyticsHttp::new(&self.base_url, self.timeout)?,
        })
    }
}
