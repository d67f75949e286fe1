//! Dialogue router
//!
//! Selects the backend for the request's language and folds every failure
//! into a fixed apology reply. The kiosk prefers a conversational degradation
//! over a hard failure: upstream trouble is never surfaced to the visitor as
//! an error.

use std::sync::Arc;

use docent_core::Language;

use crate::backend::ChatBackend;
use crate::DialogueError;

/// Apology replies, keyed by language and failure class
pub const BUSY_REPLY_ZH: &str = "抱歉，系統目前忙碌中，請稍後再試。";
pub const UNWELL_REPLY_ZH: &str = "抱歉，我現在有點不舒服，請再對我說一次。";
pub const BUSY_REPLY_EN: &str = "Sorry, the system is busy. Please try again later.";
pub const UNWELL_REPLY_EN: &str = "Sorry, I am having some trouble. Please talk to me again.";

/// Defaults when a successful response carries no extractable reply
pub const NO_REPLY_ZH: &str = "抱歉，我無法理解您的問題。";
pub const NO_REPLY_EN: &str = "I couldn't understand that.";

/// Map a failure reason to the apology reply for the language
///
/// Pure and exhaustive: an HTTP-level rejection reads as "busy", everything
/// else (transport, timeout, undecodable response) as "not feeling well".
/// Callers should not depend on the distinction.
pub fn fallback_reply(language: Language, reason: &DialogueError) -> &'static str {
    match (language, reason) {
        (Language::Mandarin, DialogueError::UpstreamStatus(_)) => BUSY_REPLY_ZH,
        (Language::Mandarin, _) => UNWELL_REPLY_ZH,
        (Language::English, DialogueError::UpstreamStatus(_)) => BUSY_REPLY_EN,
        (Language::English, _) => UNWELL_REPLY_EN,
    }
}

fn no_reply_default(language: Language) -> &'static str {
    match language {
        Language::Mandarin => NO_REPLY_ZH,
        Language::English => NO_REPLY_EN,
    }
}

/// Reply produced by the router
///
/// Canned text (apologies, could-not-understand defaults) is already in its
/// final wording and must not be run through reply post-processing; backend
/// text still needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutedReply {
    /// Text produced by the remote backend
    Backend(String),
    /// One of the fixed replies owned by this crate
    Canned(&'static str),
}

impl RoutedReply {
    pub fn into_text(self) -> String {
        match self {
            RoutedReply::Backend(text) => text,
            RoutedReply::Canned(text) => text.to_string(),
        }
    }
}

/// Language-dispatching router over the two chat backends
pub struct DialogueRouter {
    mandarin: Arc<dyn ChatBackend>,
    english: Arc<dyn ChatBackend>,
}

impl DialogueRouter {
    pub fn new(mandarin: Arc<dyn ChatBackend>, english: Arc<dyn ChatBackend>) -> Self {
        Self { mandarin, english }
    }

    /// Route one turn to the language's backend
    ///
    /// Precondition: `text` is non-empty after trimming; the orchestrator
    /// short-circuits empty input before reaching the router.
    ///
    /// Makes exactly one outbound call and never retries. The result is
    /// always usable conversational text: failures become the fixed apology
    /// for the language, a reply-less success becomes the
    /// could-not-understand default.
    pub async fn route(
        &self,
        text: &str,
        language: Language,
        conversation_id: &str,
    ) -> RoutedReply {
        let backend = match language {
            Language::Mandarin => &self.mandarin,
            Language::English => &self.english,
        };

        match backend.reply(text, conversation_id).await {
            Ok(Some(reply)) => RoutedReply::Backend(reply),
            Ok(None) => {
                tracing::debug!(
                    backend = backend.backend_name(),
                    language = %language,
                    "Backend response carried no reply, using default"
                );
                RoutedReply::Canned(no_reply_default(language))
            }
            Err(e) => {
                tracing::warn!(
                    backend = backend.backend_name(),
                    language = %language,
                    error = %e,
                    "Chat backend call failed, substituting fallback reply"
                );
                RoutedReply::Canned(fallback_reply(language, &e))
            }
        }
    }
}
