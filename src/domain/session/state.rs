//! Session state container — app-owned, SDK-provided update logic.

use super::toggle::ToggleTarget;
use super::{Message, MessageContent, Reply};
use crate::error::SessionError;

/// The ordered message timeline of one conversation.
///
/// Append-only. At most one message is pending and it is always the last
/// one; the session is busy exactly while it exists. Every operation either
/// applies completely or returns an error and leaves the session untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    messages: Vec<Message>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True while a query placeholder is waiting for its result.
    pub fn is_busy(&self) -> bool {
        self.pending_index().is_some()
    }

    /// Index of the pending placeholder, if any.
    pub fn pending_index(&self) -> Option<usize> {
        match self.messages.last() {
            Some(m) if m.is_pending() => Some(self.messages.len() - 1),
            _ => None,
        }
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Append a user message with the trimmed `text`. Returns its index.
    pub fn append_user(&mut self, text: &str) -> Result<usize, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyInput);
        }
        self.messages.push(Message::user(text));
        Ok(self.messages.len() - 1)
    }

    /// Append a pending bot placeholder. Returns its index.
    pub fn append_placeholder(&mut self) -> Result<usize, SessionError> {
        if self.is_busy() {
            return Err(SessionError::PlaceholderPending);
        }
        self.messages.push(Message::placeholder());
        Ok(self.messages.len() - 1)
    }

    /// Start a query cycle: the user message followed by its placeholder.
    ///
    /// Rejected without changes when the input is blank or a query is
    /// already in flight. Returns the placeholder index.
    pub fn begin_query(&mut self, text: &str) -> Result<usize, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        if self.is_busy() {
            return Err(SessionError::Reentrant);
        }
        self.append_user(text)?;
        self.append_placeholder()
    }

    /// Replace the pending placeholder, in place, with a terminal reply.
    /// Returns the index of the resolved message.
    pub fn resolve_placeholder(&mut self, reply: Reply) -> Result<usize, SessionError> {
        let index = self
            .pending_index()
            .ok_or(SessionError::NoPendingPlaceholder)?;
        *self.messages[index].content_mut() = reply.into();
        Ok(index)
    }

    /// Flip one chart-visibility flag. Returns the flag's new value.
    ///
    /// A single-area message is addressed without an area key, a comparison
    /// message with one of its keys. Anything else is rejected untouched.
    pub fn toggle(&mut self, target: &ToggleTarget) -> Result<bool, SessionError> {
        let index = target.message;
        let len = self.messages.len();
        let message = self
            .messages
            .get_mut(index)
            .ok_or(SessionError::MessageOutOfRange { index, len })?;

        match (message.content_mut(), &target.area) {
            (MessageContent::Single { show_chart, .. }, None) => {
                *show_chart = !*show_chart;
                Ok(*show_chart)
            }
            (MessageContent::Compare { toggles, .. }, Some(key)) => {
                toggles
                    .flip(key.as_str())
                    .ok_or_else(|| SessionError::UnknownArea {
                        index,
                        area: key.to_string(),
                    })
            }
            (MessageContent::Single { .. }, Some(_)) | (MessageContent::Compare { .. }, None) => {
                Err(SessionError::AreaKeyMismatch { index })
            }
            _ => Err(SessionError::NotToggleable { index }),
        }
    }

    /// Read one chart-visibility flag. Unaddressable targets read as hidden.
    pub fn is_chart_shown(&self, target: &ToggleTarget) -> bool {
        match (self.get(target.message).map(Message::content), &target.area) {
            (Some(MessageContent::Single { show_chart, .. }), None) => *show_chart,
            (Some(MessageContent::Compare { toggles, .. }), Some(key)) => {
                toggles.is_shown(key.as_str())
            }
            _ => false,
        }
    }
}
