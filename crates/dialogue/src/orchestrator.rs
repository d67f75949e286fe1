//! Per-request orchestration
//!
//! One exchange walks a small state machine with two terminal states:
//!
//! 1. Script-convert the incoming text and trim whitespace.
//! 2. Empty result → `empty` outcome; the router and post-processing never
//!    run and no network call is made.
//! 3. Otherwise route the turn, finalize the reply, script-convert it, and
//!    return a `success` outcome; fallback replies count as success.
//!
//! Post-processing (corrections, Mandarin emphasis stripping) applies to
//! backend-produced text only; the router's canned replies are already in
//! their final wording.

use std::sync::Arc;

use docent_core::{ConversationContext, DialogueOutcome, ScriptConverter};
use docent_text::finalize_reply;

use crate::router::{DialogueRouter, RoutedReply};

/// Composes conversion, routing, and post-processing for one exchange
pub struct Orchestrator {
    router: DialogueRouter,
    converter: Arc<dyn ScriptConverter>,
}

impl Orchestrator {
    pub fn new(router: DialogueRouter, converter: Arc<dyn ScriptConverter>) -> Self {
        Self { router, converter }
    }

    /// Run one exchange
    ///
    /// Infallible: upstream trouble is already folded into the reply by the
    /// router, and the remaining steps are pure.
    pub async fn respond(&self, text: &str, ctx: &ConversationContext) -> DialogueOutcome {
        let converted = self.converter.convert(text);
        let input = converted.trim();

        if input.is_empty() {
            tracing::debug!(
                language = %ctx.language,
                conversation_id = %ctx.conversation_id,
                "Empty input, skipping backend call"
            );
            return DialogueOutcome::empty(ctx.conversation_id.as_str());
        }

        let routed = self
            .router
            .route(input, ctx.language, &ctx.conversation_id)
            .await;
        let finalized = match routed {
            RoutedReply::Backend(reply) => {
                self.converter.convert(&finalize_reply(&reply, ctx.language))
            }
            RoutedReply::Canned(reply) => reply.to_string(),
        };

        DialogueOutcome::success(input, finalized, ctx.conversation_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ChatBackend;
    use crate::router::{BUSY_REPLY_ZH, NO_REPLY_ZH, UNWELL_REPLY_EN};
    use crate::DialogueError;
    use async_trait::async_trait;
    use docent_core::{DialogueStatus, Language};
    use docent_text::{CharTableConverter, IdentityConverter};
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Canned = Result<Option<&'static str>, fn() -> DialogueError>;

    struct CountingBackend {
        calls: Arc<AtomicUsize>,
        result: Canned,
    }

    #[async_trait]
    impl ChatBackend for CountingBackend {
        async fn reply(
            &self,
            _text: &str,
            _conversation_id: &str,
        ) -> Result<Option<String>, DialogueError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(reply) => Ok(reply.map(str::to_string)),
                Err(make) => Err(make()),
            }
        }

        fn backend_name(&self) -> &str {
            "counting"
        }
    }

    fn orchestrator_with(
        mandarin: Canned,
        english: Canned,
        converter: Arc<dyn ScriptConverter>,
    ) -> (Orchestrator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let router = DialogueRouter::new(
            Arc::new(CountingBackend {
                calls: calls.clone(),
                result: mandarin,
            }),
            Arc::new(CountingBackend {
                calls: calls.clone(),
                result: english,
            }),
        );
        (Orchestrator::new(router, converter), calls)
    }

    fn ctx(language: Language) -> ConversationContext {
        ConversationContext::new("visitor-1", language)
    }

    #[tokio::test]
    async fn test_empty_input_never_reaches_backend() {
        let (orchestrator, calls) =
            orchestrator_with(Ok(Some("x")), Ok(Some("x")), Arc::new(IdentityConverter));

        for input in ["", "   ", "\n\t "] {
            let outcome = orchestrator.respond(input, &ctx(Language::Mandarin)).await;
            assert_eq!(outcome.status, DialogueStatus::Empty);
            assert_eq!(outcome.input_text, "");
            assert_eq!(outcome.reply_text, "");
            assert_eq!(outcome.conversation_id, "visitor-1");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_path_converts_and_finalizes() {
        let converter = Arc::new(CharTableConverter::from_pairs([('么', '麼')]));
        let (orchestrator, calls) =
            orchestrator_with(Ok(Some("**很好**。")), Ok(Some("x")), converter);

        let outcome = orchestrator
            .respond("  什么是代工  ", &ctx(Language::Mandarin))
            .await;
        assert_eq!(outcome.status, DialogueStatus::Success);
        assert_eq!(outcome.input_text, "什麼是代工");
        // emphasis markers and trailing full stop are gone
        assert_eq!(outcome.reply_text, "很好");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_is_still_success() {
        let (orchestrator, _) = orchestrator_with(
            Err(|| DialogueError::UpstreamStatus(503)),
            Err(|| DialogueError::Timeout),
            Arc::new(IdentityConverter),
        );

        let outcome = orchestrator.respond("你好", &ctx(Language::Mandarin)).await;
        assert_eq!(outcome.status, DialogueStatus::Success);
        assert_eq!(outcome.reply_text, BUSY_REPLY_ZH);

        let outcome = orchestrator.respond("hello", &ctx(Language::English)).await;
        assert_eq!(outcome.status, DialogueStatus::Success);
        assert_eq!(outcome.reply_text, UNWELL_REPLY_EN);
    }

    #[tokio::test]
    async fn test_reply_less_success_keeps_default_wording() {
        let (orchestrator, _) =
            orchestrator_with(Ok(None), Ok(None), Arc::new(IdentityConverter));
        let outcome = orchestrator.respond("你好", &ctx(Language::Mandarin)).await;
        assert_eq!(outcome.status, DialogueStatus::Success);
        // canned replies bypass post-processing, the full stop survives
        assert_eq!(outcome.reply_text, NO_REPLY_ZH);
    }

    #[tokio::test]
    async fn test_english_reply_keeps_emphasis_markers() {
        let (orchestrator, _) = orchestrator_with(
            Ok(Some("x")),
            Ok(Some("a *starred* word")),
            Arc::new(IdentityConverter),
        );
        let outcome = orchestrator.respond("hello", &ctx(Language::English)).await;
        assert_eq!(outcome.reply_text, "a *starred* word");
    }
}
