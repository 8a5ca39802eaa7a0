//! Wire types for the analysis endpoints (REST).

use crate::domain::analysis::TableRow;
use serde::{Deserialize, Serialize};

// ─── Requests ────────────────────────────────────────────────────────────────

/// Body of `POST /api/analysis/query/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub use_preloaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preloaded_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_path: Option<String>,
}

impl QueryRequest {
    /// A query against the dataset the service has pre-loaded.
    pub fn preloaded(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            use_preloaded: true,
            preloaded_path: None,
            uploaded_path: None,
        }
    }

    /// A query against a dataset previously sent to the upload endpoint.
    pub fn uploaded(query: impl Into<String>, uploaded_path: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            use_preloaded: false,
            preloaded_path: None,
            uploaded_path: Some(uploaded_path.into()),
        }
    }
}

// ─── Responses ───────────────────────────────────────────────────────────────

/// Time series as sent by the service. Missing points are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub price: Vec<Option<f64>>,
    #[serde(default)]
    pub demand: Vec<Option<f64>>,
}

/// `{"type": "single", ...}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleResponse {
    pub area: String,
    pub summary: String,
    pub chart: ChartResponse,
    #[serde(default)]
    pub table: Vec<TableRow>,
}

/// One entry of a compare response. The service omits `area` here; the map
/// key names the area instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaResponse {
    #[serde(default)]
    pub area: Option<String>,
    pub summary: String,
    pub chart: ChartResponse,
    #[serde(default)]
    pub table: Vec<TableRow>,
}

/// `{"type": "compare", "results": {...}}` response.
///
/// `results` keeps the key order of the response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub results: serde_json::Map<String, serde_json::Value>,
}

/// Response of `POST /api/analysis/upload/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub uploaded_path: String,
}

/// Error body the service returns alongside 4xx/5xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "message")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Extract the human-readable message from an error body, falling back
    /// to the raw body text.
    pub fn message_from_body(body: &str) -> String {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .unwrap_or_else(|| body.to_string())
    }
}
