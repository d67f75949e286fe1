//! End-to-end exchange flow over mock chat backends
//!
//! Exercises the full pipeline the HTTP handlers use: script conversion,
//! empty-input short circuit, routing with fallback, and reply
//! post-processing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use docent_core::{ConversationContext, DialogueStatus, Language, ScriptConverter};
use docent_dialogue::{
    ChatBackend, DialogueError, DialogueRouter, Orchestrator,
};
use docent_text::CharTableConverter;

/// Scripted backend: a fixed outcome per call, plus a call counter
struct ScriptedBackend {
    calls: Arc<AtomicUsize>,
    outcome: Box<dyn Fn() -> Result<Option<String>, DialogueError> + Send + Sync>,
}

impl ScriptedBackend {
    fn new(
        calls: Arc<AtomicUsize>,
        outcome: impl Fn() -> Result<Option<String>, DialogueError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls,
            outcome: Box::new(outcome),
        }
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn reply(
        &self,
        _text: &str,
        _conversation_id: &str,
    ) -> Result<Option<String>, DialogueError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.outcome)()
    }

    fn backend_name(&self) -> &str {
        "scripted"
    }
}

fn exhibit_converter() -> Arc<dyn ScriptConverter> {
    Arc::new(CharTableConverter::from_pairs([
        ('么', '麼'),
        ('们', '們'),
        ('发', '發'),
    ]))
}

fn build(
    mandarin: impl Fn() -> Result<Option<String>, DialogueError> + Send + Sync + 'static,
    english: impl Fn() -> Result<Option<String>, DialogueError> + Send + Sync + 'static,
) -> (Orchestrator, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let router = DialogueRouter::new(
        Arc::new(ScriptedBackend::new(calls.clone(), mandarin)),
        Arc::new(ScriptedBackend::new(calls.clone(), english)),
    );
    (Orchestrator::new(router, exhibit_converter()), calls)
}

fn zh(conversation_id: &str) -> ConversationContext {
    ConversationContext::new(conversation_id, Language::Mandarin)
}

fn en(conversation_id: &str) -> ConversationContext {
    ConversationContext::new(conversation_id, Language::English)
}

#[tokio::test]
async fn whitespace_input_short_circuits_without_a_call() {
    let (orchestrator, calls) = build(|| Ok(Some("x".into())), || Ok(Some("x".into())));

    for input in ["", "   ", " \u{3000} "] {
        let outcome = orchestrator.respond(input, &zh("v1")).await;
        assert_eq!(outcome.status, DialogueStatus::Empty);
        assert_eq!(outcome.input_text, "");
        assert_eq!(outcome.reply_text, "");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn mandarin_exchange_converts_script_both_ways() {
    let (orchestrator, _) = build(
        || Ok(Some("我们发货很快。".to_string())),
        || Ok(Some("x".into())),
    );

    let outcome = orchestrator.respond("  发什么货  ", &zh("v1")).await;
    assert_eq!(outcome.status, DialogueStatus::Success);
    // converted and trimmed
    assert_eq!(outcome.input_text, "發什麼货");
    // the reply is converted and its trailing full stop stripped
    assert_eq!(outcome.reply_text, "我們發货很快");
}

#[tokio::test]
async fn mandarin_http_failure_yields_busy_apology_verbatim() {
    let (orchestrator, _) = build(
        || Err(DialogueError::UpstreamStatus(502)),
        || Ok(Some("x".into())),
    );

    let outcome = orchestrator.respond("你好", &zh("v1")).await;
    assert_eq!(outcome.status, DialogueStatus::Success);
    assert_eq!(outcome.reply_text, "抱歉，系統目前忙碌中，請稍後再試。");
}

#[tokio::test]
async fn english_timeout_yields_unwell_apology_verbatim() {
    let (orchestrator, _) = build(
        || Ok(Some("x".into())),
        || Err(DialogueError::Timeout),
    );

    let outcome = orchestrator.respond("hello", &en("v1")).await;
    assert_eq!(outcome.status, DialogueStatus::Success);
    assert_eq!(
        outcome.reply_text,
        "Sorry, I am having some trouble. Please talk to me again."
    );
}

#[tokio::test]
async fn mandarin_empty_turn_list_yields_default_verbatim() {
    let (orchestrator, _) = build(|| Ok(None), || Ok(Some("x".into())));

    let outcome = orchestrator.respond("你好", &zh("v1")).await;
    assert_eq!(outcome.status, DialogueStatus::Success);
    assert_eq!(outcome.reply_text, "抱歉，我無法理解您的問題。");
}

#[tokio::test]
async fn mandarin_reply_loses_every_emphasis_run() {
    let (orchestrator, _) = build(
        || Ok(Some("**很好**，歡迎**參觀**".to_string())),
        || Ok(Some("x".into())),
    );

    let outcome = orchestrator.respond("你好", &zh("v1")).await;
    assert_eq!(outcome.reply_text, "很好，歡迎參觀");
}

#[tokio::test]
async fn conversation_id_is_echoed_untouched() {
    let (orchestrator, _) = build(|| Ok(Some("好".into())), || Ok(Some("ok".into())));

    let outcome = orchestrator.respond("你好", &zh("booth-42/visitor-9")).await;
    assert_eq!(outcome.conversation_id, "booth-42/visitor-9");

    let outcome = orchestrator.respond("", &en("booth-42/visitor-9")).await;
    assert_eq!(outcome.conversation_id, "booth-42/visitor-9");
}
