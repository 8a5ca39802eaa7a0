//! # Real-estate analytics chat SDK
//!
//! Client-side session state for a natural-language real-estate analytics
//! chat: the message timeline, the "Analyzing..." placeholder lifecycle,
//! single/compare response classification, and chart visibility toggles.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Domain types, response classification, session state (no I/O)
//! 2. **Dispatch** — `Conversation`, driving one query cycle against an `AnalysisBackend`
//! 3. **HTTP API** — `AnalyticsHttp`, the reqwest-backed backend
//! 4. **High-Level Client** — `AnalyticsClient` with a builder and sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use realestate_chat_sdk::prelude::*;
//!
//! let client = AnalyticsClient::builder()
//!     .base_url("http://127.0.0.1:8000")
//!     .build()?;
//!
//! let chat = client.conversation();
//! chat.submit("Compare Wakad and Aundh").await;
//! for view in chat.snapshot().await.views() {
//!     // render
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Dispatch ────────────────────────────────────────────────────────

/// Query dispatcher: one submit cycle against the analysis service.
pub mod conversation;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client for the analysis endpoints.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `AnalyticsClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::AreaKey;

    // Domain types — analysis
    pub use crate::domain::analysis::{
        classify, AnalysisResult, ChartPoint, ChartSeries, ClassificationError, CompareResult,
        QueryRequest, SingleResult, TableRow, UploadResponse,
    };

    // Domain types — session
    pub use crate::domain::session::{
        AreaToggles, ComparisonView, Message, MessageContent, MessageView, Reply, Role, Session,
        SummaryView, ToggleTarget, ANALYSIS_FAILED_TEXT, PLACEHOLDER_TEXT,
    };

    // Dispatch
    pub use crate::conversation::{AnalysisBackend, Conversation, SubmitOutcome};

    // Errors
    pub use crate::error::{HttpError, QueryError, SdkError, SessionError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{AnalysisClient, AnalyticsClient, AnalyticsClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::AnalyticsHttp;
}
