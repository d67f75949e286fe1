//! Conversation types
//!
//! The gateway holds no session state. A conversation is correlated across
//! turns solely by the caller-supplied `conversation_id`, which the remote
//! chat backend uses to recall history; here it is an opaque token passed
//! through and echoed back.

use serde::{Deserialize, Serialize};

use crate::Language;

/// Per-request conversation coordinates, supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Opaque caller-supplied token correlating turns at the chat backend
    pub conversation_id: String,
    /// Target language of the exchange
    pub language: Language,
}

impl ConversationContext {
    pub fn new(conversation_id: impl Into<String>, language: Language) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            language,
        }
    }
}

/// Terminal state of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogueStatus {
    /// Input was empty after conversion and trimming; no backend was called
    Empty,
    /// A reply was produced (possibly fallback text)
    Success,
}

/// Result of one conversational exchange
///
/// Produced per request and returned to the caller; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueOutcome {
    pub status: DialogueStatus,
    /// Normalized, script-converted input text ("" when status is `empty`)
    pub input_text: String,
    /// Finalized, script-converted reply text ("" when status is `empty`)
    pub reply_text: String,
    /// Echo of the caller-supplied conversation identifier
    pub conversation_id: String,
}

impl DialogueOutcome {
    /// Outcome for empty input: no backend call was made
    pub fn empty(conversation_id: impl Into<String>) -> Self {
        Self {
            status: DialogueStatus::Empty,
            input_text: String::new(),
            reply_text: String::new(),
            conversation_id: conversation_id.into(),
        }
    }

    pub fn success(
        input_text: impl Into<String>,
        reply_text: impl Into<String>,
        conversation_id: impl Into<String>,
    ) -> Self {
        Self {
            status: DialogueStatus::Success,
            input_text: input_text.into(),
            reply_text: reply_text.into(),
            conversation_id: conversation_id.into(),
        }
    }
}
