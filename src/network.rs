//! Network constants for the analytics query service.

use std::time::Duration;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Natural-language analysis endpoint.
pub const QUERY_PATH: &str = "/api/analysis/query/";

/// Dataset upload endpoint (multipart, field `file`).
pub const UPLOAD_PATH: &str = "/api/analysis/upload/";

/// Request budget; exceeding it surfaces as a transport failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
