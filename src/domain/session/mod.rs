//! Session domain — the message timeline, placeholder lifecycle, chart toggles.

pub mod state;
pub mod toggle;
pub mod view;

use crate::domain::analysis::{AnalysisResult, CompareResult, SingleResult};

pub use state::Session;
pub use toggle::{AreaToggles, ToggleTarget};
pub use view::{ComparisonView, MessageView, SummaryView};

/// Text shown for a bot message while its query is in flight.
pub const PLACEHOLDER_TEXT: &str = "Analyzing...";

/// Text a failed query resolves to, whatever the cause.
pub const ANALYSIS_FAILED_TEXT: &str = "Sorry — something went wrong while analyzing that query.";

// ─── Role ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

// ─── MessageContent ──────────────────────────────────────────────────────────

/// What a message holds. Result variants carry their chart toggle state.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Pending,
    Single {
        result: SingleResult,
        show_chart: bool,
    },
    Compare {
        result: CompareResult,
        toggles: AreaToggles,
    },
    Error(String),
}

impl MessageContent {
    pub fn is_pending(&self) -> bool {
        matches!(self, MessageContent::Pending)
    }
}

// ─── Reply ───────────────────────────────────────────────────────────────────

/// A terminal bot content a pending placeholder can resolve to.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Analysis(AnalysisResult),
    Text(String),
    Error(String),
}

impl Reply {
    /// The generic failure reply.
    pub fn failed() -> Self {
        Reply::Error(ANALYSIS_FAILED_TEXT.to_string())
    }
}

impl From<Reply> for MessageContent {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Analysis(AnalysisResult::Single(result)) => MessageContent::Single {
                result,
                show_chart: false,
            },
            Reply::Analysis(AnalysisResult::Compare(result)) => {
                let toggles = AreaToggles::for_areas(result.keys());
                MessageContent::Compare { result, toggles }
            }
            Reply::Text(text) => MessageContent::Text(text),
            Reply::Error(text) => MessageContent::Error(text),
        }
    }
}

// ─── Message ─────────────────────────────────────────────────────────────────

/// One entry of the session timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    role: Role,
    content: MessageContent,
}

impl Message {
    pub(crate) fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub(crate) fn placeholder() -> Self {
        Self {
            role: Role::Bot,
            content: MessageContent::Pending,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut MessageContent {
        &mut self.content
    }

    pub fn is_pending(&self) -> bool {
        self.content.is_pending()
    }

    /// The message text for user, bot-text and error messages.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(t) | MessageContent::Error(t) => Some(t.as_str()),
            _ => None,
        }
    }
}
