//! Analysis sub-client — one-shot queries and dataset uploads.

use crate::client::AnalyticsClient;
use crate::domain::analysis::wire::{QueryRequest, UploadResponse};
use crate::domain::analysis::{classify, AnalysisResult};
use crate::error::{QueryError, SdkError, SessionError};

pub struct Analysis<'a> {
    pub(crate) client: &'a AnalyticsClient,
}

impl<'a> Analysis<'a> {
    /// Query the preloaded dataset. Blank input is rejected before any request.
    pub async fn query(&self, text: &str) -> Result<AnalysisResult, SdkError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyInput.into());
        }
        self.query_with(&QueryRequest::preloaded(text)).await
    }

    /// Query with an explicit request, e.g. against an uploaded dataset.
    pub async fn query_with(&self, request: &QueryRequest) -> Result<AnalysisResult, SdkError> {
        let body = self.client.http.post_query(request).await?;
        classify(body).map_err(|e| SdkError::Query(QueryError::Classification(e)))
    }

    /// Upload a dataset file. The returned path can be passed to
    /// [`QueryRequest::uploaded`].
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResponse, SdkError> {
        if file_name.trim().is_empty() {
            return Err(SdkError::Validation("file name is empty".to_string()));
        }
        Ok(self.client.http.upload_dataset(file_name, bytes).await?)
    }
}
