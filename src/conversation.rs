//! Query dispatch — one submit cycle against the analysis service.
//!
//! A [`Conversation`] owns the shared [`Session`] and an [`AnalysisBackend`].
//! `submit` appends the user message and a placeholder, awaits the backend,
//! then resolves the placeholder in place with the classified result or the
//! generic failure text. Only one query is in flight at a time; a submit
//! observed while busy is rejected without touching the session.

use crate::domain::analysis::{classify, AnalysisResult, QueryRequest};
use crate::domain::session::{Reply, Session, ToggleTarget};
use crate::error::{QueryError, SessionError};

use async_lock::RwLock;
use async_trait::async_trait;
use std::sync::Arc;

/// The remote side of a query: sends a request, returns the decoded body.
///
/// Implementations report transport and decode failures; classification of
/// the body happens in the dispatcher.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<serde_json::Value, QueryError>;
}

/// What a call to [`Conversation::submit`] did.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input; nothing was appended.
    Ignored,
    /// Not started (e.g. a query was already in flight); nothing was appended.
    Rejected(SessionError),
    /// The placeholder at `index` now holds an analysis result.
    Answered { index: usize },
    /// The placeholder at `index` now holds the generic failure text.
    Failed { index: usize, error: QueryError },
}

impl SubmitOutcome {
    /// Whether the session was changed by this submit.
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            SubmitOutcome::Answered { .. } | SubmitOutcome::Failed { .. }
        )
    }
}

/// A conversation with the analysis service.
///
/// Clones share the same session and backend.
pub struct Conversation<B> {
    backend: Arc<B>,
    session: Arc<RwLock<Session>>,
}

impl<B> Clone for Conversation<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            session: self.session.clone(),
        }
    }
}

impl<B: AnalysisBackend> Conversation<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            session: Arc::new(RwLock::new(Session::new())),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one query cycle for `text`.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let query = text.trim();
        if query.is_empty() {
            tracing::debug!("Ignoring blank submit");
            return SubmitOutcome::Ignored;
        }

        // Both appends happen under one write so no other submit can interleave.
        let placeholder = {
            let mut session = self.session.write().await;
            match session.begin_query(query) {
                Ok(index) => index,
                Err(SessionError::EmptyInput) => return SubmitOutcome::Ignored,
                Err(e) => {
                    tracing::debug!(error = %e, "Rejecting submit");
                    return SubmitOutcome::Rejected(e);
                }
            }
        };

        // Resolves the placeholder if this future is dropped before it does.
        let mut guard = PendingGuard {
            session: &self.session,
            index: placeholder,
            armed: true,
        };

        let request = QueryRequest::preloaded(query);
        let (reply, failure) = match self.run_query(&request).await {
            Ok(result) => {
                tracing::info!(
                    kind = result.kind(),
                    areas = result.area_count(),
                    index = placeholder,
                    "Analysis answered"
                );
                (Reply::Analysis(result), None)
            }
            Err(error) => {
                tracing::warn!(
                    error_kind = error.kind(),
                    index = placeholder,
                    "Analysis failed: {}",
                    error
                );
                (Reply::failed(), Some(error))
            }
        };

        let resolved = self.session.write().await.resolve_placeholder(reply);
        guard.armed = false;
        match (resolved, failure) {
            (Ok(index), None) => SubmitOutcome::Answered { index },
            (Ok(index), Some(error)) => SubmitOutcome::Failed { index, error },
            (Err(e), _) => {
                tracing::error!(error = %e, placeholder, "Placeholder vanished before resolution");
                SubmitOutcome::Rejected(e)
            }
        }
    }

    async fn run_query(&self, request: &QueryRequest) -> Result<AnalysisResult, QueryError> {
        let body = self.backend.query(request).await?;
        Ok(classify(body)?)
    }
}

/// Fails the pending placeholder of a submit that was cancelled mid-flight.
struct PendingGuard<'a> {
    session: &'a RwLock<Session>,
    index: usize,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Critical sections on the session never await, so a held lock is
        // released without needing this task to make progress.
        let mut session = match self.session.try_write() {
            Some(session) => session,
            None => self.session.write_blocking(),
        };
        if session.pending_index() == Some(self.index) {
            tracing::warn!(index = self.index, "Submit cancelled before the reply arrived");
            let _ = session.resolve_placeholder(Reply::failed());
        }
    }
}

impl<B> Conversation<B> {
    /// Flip one chart-visibility flag. Address errors leave the session untouched.
    pub async fn toggle(&self, target: &ToggleTarget) -> Result<bool, SessionError> {
        let result = self.session.write().await.toggle(target);
        if let Err(e) = &result {
            tracing::debug!(error = %e, message = target.message, "Ignoring toggle");
        }
        result
    }

    pub async fn is_busy(&self) -> bool {
        self.session.read().await.is_busy()
    }

    /// A copy of the current session, for rendering.
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }
}
