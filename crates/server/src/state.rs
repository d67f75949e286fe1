//! Application state
//!
//! Everything here is an immutable snapshot built once at startup and shared
//! by reference: settings, the normalization data, and the collaborator
//! clients. All outbound calls go through one process-wide `reqwest::Client`
//! (clones share the same connection pool), released only at shutdown.

use std::sync::Arc;
use std::time::Duration;

use docent_config::Settings;
use docent_core::{ScriptConverter, SpeechSynthesizer, Transcriber};
use docent_dialogue::{
    CustomServiceBackend, CustomServiceConfig, DialogueRouter, NotebookChatBackend,
    NotebookChatConfig, Orchestrator,
};
use docent_speech::{
    HttpSynthesizer, HttpTranscriber, PhraseList, RecognizerConfig, SynthesizerConfig,
};
use docent_text::{CharTableConverter, RuleStore};

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration snapshot
    pub config: Arc<Settings>,
    /// Dialogue pipeline (conversion, routing, post-processing)
    pub orchestrator: Arc<Orchestrator>,
    /// Speech recognition client
    pub transcriber: Arc<dyn Transcriber>,
    /// Speech synthesis client
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// Replacement rules for synthesized-speech text
    pub rules: Arc<RuleStore>,
}

impl AppState {
    /// Build the full state from settings
    ///
    /// Loads the normalization data files (all fail-soft) and wires every
    /// collaborator client over one shared HTTP client.
    pub fn from_settings(settings: Settings) -> Result<Self, ServerError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ServerError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let timeout = Duration::from_secs(settings.dialogue.timeout_seconds);
        let mandarin = NotebookChatBackend::new(
            NotebookChatConfig {
                endpoint: settings.dialogue.mandarin.endpoint.clone(),
                notebook_id: settings.dialogue.mandarin.notebook_id.clone(),
                timeout,
            },
            client.clone(),
        );
        let english = CustomServiceBackend::new(
            CustomServiceConfig {
                endpoint: settings.dialogue.english.endpoint.clone(),
                bearer_token: settings.dialogue.english.bearer_token.clone(),
                user_id: settings.dialogue.english.user_id.clone(),
                timeout,
            },
            client.clone(),
        );
        let router = DialogueRouter::new(Arc::new(mandarin), Arc::new(english));

        let converter: Arc<dyn ScriptConverter> =
            Arc::new(CharTableConverter::load(&settings.text.script_table_path));
        let orchestrator = Arc::new(Orchestrator::new(router, converter));

        let transcriber = Arc::new(HttpTranscriber::new(
            RecognizerConfig {
                endpoint: settings.speech.endpoint.clone(),
                sample_rate_hertz: settings.speech.sample_rate_hertz,
                phrase_boost: settings.speech.phrase_boost,
                timeout: Duration::from_secs(settings.speech.timeout_seconds),
            },
            client.clone(),
            PhraseList::load(&settings.speech.mandarin_phrases_path),
            PhraseList::load(&settings.speech.english_phrases_path),
        ));

        let synthesizer = Arc::new(HttpSynthesizer::new(
            SynthesizerConfig {
                endpoint: settings.synthesis.endpoint.clone(),
                timeout: Duration::from_secs(settings.synthesis.timeout_seconds),
            },
            client,
        ));

        let rules = Arc::new(RuleStore::load(&settings.text.replacements_path));

        Ok(Self {
            config: Arc::new(settings),
            orchestrator,
            transcriber,
            synthesizer,
            rules,
        })
    }

    /// Assemble state from pre-built components (used by tests)
    pub fn with_components(
        settings: Settings,
        orchestrator: Arc<Orchestrator>,
        transcriber: Arc<dyn Transcriber>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        rules: Arc<RuleStore>,
    ) -> Self {
        Self {
            config: Arc::new(settings),
            orchestrator,
            transcriber,
            synthesizer,
            rules,
        }
    }
}
