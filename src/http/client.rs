//! Low-level HTTP client — `AnalyticsHttp`.
//!
//! One method per API endpoint. Returns wire types or the raw decoded body;
//! classification into domain types happens above this layer.

use crate::conversation::AnalysisBackend;
use crate::domain::analysis::wire::{ErrorResponse, QueryRequest, UploadResponse};
use crate::error::{HttpError, QueryError};
use crate::network::{QUERY_PATH, UPLOAD_PATH};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

/// Low-level HTTP client for the analytics REST API.
#[derive(Clone)]
pub struct AnalyticsHttp {
    base_url: String,
    client: Client,
}

impl AnalyticsHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(HttpError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            base_url: trimmed.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Analysis ─────────────────────────────────────────────────────────

    /// `POST /api/analysis/query/`, returning the decoded but unclassified body.
    pub async fn post_query(
        &self,
        request: &QueryRequest,
    ) -> Result<serde_json::Value, QueryError> {
        let url = format!("{}{}", self.base_url, QUERY_PATH);
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "POST {}", url);

        if !status.is_success() {
            return Err(HttpError::from_status(
                status.as_u16(),
                ErrorResponse::message_from_body(&body),
            )
            .into());
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// `POST /api/analysis/upload/` with the file under the multipart field `file`.
    pub async fn upload_dataset(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, HttpError> {
        let url = format!("{}{}", self.base_url, UPLOAD_PATH);
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "POST {}", url);

        if status.is_success() {
            return resp.json::<UploadResponse>().await.map_err(from_reqwest);
        }

        let body_text = resp.text().await.unwrap_or_default();
        Err(HttpError::from_status(
            status.as_u16(),
            ErrorResponse::message_from_body(&body_text),
        ))
    }
}

fn from_reqwest(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(err)
    }
}

fn transport(err: reqwest::Error) -> QueryError {
    QueryError::Transport(from_reqwest(err))
}

#[async_trait]
impl AnalysisBackend for AnalyticsHttp {
    async fn query(&self, request: &QueryRequest) -> Result<serde_json::Value, QueryError> {
        self.post_query(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let http = AnalyticsHttp::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(http.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        let err = AnalyticsHttp::new("//", Duration::from_secs(5)).err().unwrap();
        assert!(matches!(&err, HttpError::InvalidBaseUrl(url) if url == "//"));
        assert_eq!(err.to_string(), "Invalid base URL: //");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_failure() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        let http = AnalyticsHttp::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = http
            .post_query(&QueryRequest::preloaded("Analyze Wakad"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
