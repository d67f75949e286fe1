//! Bilingual dialogue routing
//!
//! Two structurally different remote chat backends sit behind the common
//! [`ChatBackend`] trait: a notebook-chat service for Mandarin and a
//! custom-service endpoint for English. The [`DialogueRouter`] dispatches on
//! the request's language tag, bounds each call at the configured budget, and
//! substitutes a fixed language-appropriate fallback reply on any failure, so
//! the caller always receives conversational text, never an upstream error.
//!
//! The [`Orchestrator`] wraps the router into the per-request state machine
//! (script conversion, empty-input short circuit, reply post-processing).

pub mod backend;
pub mod english;
pub mod mandarin;
pub mod orchestrator;
pub mod router;

pub use backend::ChatBackend;
pub use english::{CustomServiceBackend, CustomServiceConfig};
pub use mandarin::{NotebookChatBackend, NotebookChatConfig};
pub use orchestrator::Orchestrator;
pub use router::{fallback_reply, DialogueRouter, RoutedReply};

use thiserror::Error;

/// Failure reasons for one chat backend call
///
/// These never reach the caller directly: the router folds them into the
/// fallback reply via [`fallback_reply`]. The variants distinguish an
/// HTTP-level rejection from transport and decoding failures because the
/// fallback wording differs; callers should not depend on the distinction.
#[derive(Error, Debug)]
pub enum DialogueError {
    #[error("upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for DialogueError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DialogueError::Timeout
        } else {
            DialogueError::Network(err.to_string())
        }
    }
}

impl From<DialogueError> for docent_core::Error {
    fn from(err: DialogueError) -> Self {
        docent_core::Error::Dialogue(err.to_string())
    }
}
