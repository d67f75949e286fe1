//! HTTP endpoints
//!
//! The four conversational request shapes (voice/text × Mandarin/English),
//! speech synthesis, and service metadata. Chat responses always carry
//! conversational text (upstream failures are folded into fallback replies
//! by the dialogue router), so only bad uploads and speech collaborator
//! failures produce error statuses here.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use docent_core::{
    AudioFormat, ConversationContext, DialogueOutcome, DialogueStatus, Language, SynthesisSpec,
};
use docent_text::apply_corrections;

use crate::state::AppState;
use crate::ServerError;

/// Conversation id used when the caller supplies none
const DEFAULT_CONVERSATION_ID: &str = "default_conversation_id";

/// Upper bound on uploaded audio (about a minute of 16 kHz PCM, with margin)
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );

    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        // Voice exchanges (transcribe + chat)
        .route("/api/transcribe", post(transcribe_mandarin))
        .route("/api/transcribe_en", post(transcribe_english))
        // Text exchanges
        .route("/api/chat", post(chat_mandarin))
        .route("/api/chat_en", post(chat_english))
        // Speech synthesis
        .route("/api/tts", post(synthesize))
        // Kiosk utterances arrive as raw PCM, well past the default limit
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build the CORS layer from configured origins
///
/// The kiosk frontends are served from rotating exhibition hosts, so an
/// empty origin list means permissive.
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    if origins.is_empty() {
        tracing::info!("No CORS origins configured, allowing all origins");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Service metadata
async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "docent",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/api/transcribe": "POST - Mandarin voice exchange",
            "/api/transcribe_en": "POST - English voice exchange",
            "/api/chat": "POST - Mandarin text exchange",
            "/api/chat_en": "POST - English text exchange",
            "/api/tts": "POST - speech synthesis",
        },
    }))
}

/// Liveness check
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Text exchange request
#[derive(Debug, Deserialize)]
struct TextChatRequest {
    text: String,
    #[serde(default = "default_conversation_id")]
    conversation_id: String,
}

fn default_conversation_id() -> String {
    DEFAULT_CONVERSATION_ID.to_string()
}

/// Exchange response, one per conversational request
#[derive(Debug, Serialize)]
struct ExchangeResponse {
    status: DialogueStatus,
    input_text: String,
    reply_text: String,
    conversation_id: String,
}

impl From<DialogueOutcome> for ExchangeResponse {
    fn from(outcome: DialogueOutcome) -> Self {
        Self {
            status: outcome.status,
            input_text: outcome.input_text,
            reply_text: outcome.reply_text,
            conversation_id: outcome.conversation_id,
        }
    }
}

/// Mandarin text exchange
async fn chat_mandarin(
    State(state): State<AppState>,
    Json(request): Json<TextChatRequest>,
) -> Json<ExchangeResponse> {
    text_exchange(state, request, Language::Mandarin).await
}

/// English text exchange
async fn chat_english(
    State(state): State<AppState>,
    Json(request): Json<TextChatRequest>,
) -> Json<ExchangeResponse> {
    text_exchange(state, request, Language::English).await
}

async fn text_exchange(
    state: AppState,
    request: TextChatRequest,
    language: Language,
) -> Json<ExchangeResponse> {
    tracing::info!(language = %language, conversation_id = %request.conversation_id, "Text exchange");
    let ctx = ConversationContext::new(request.conversation_id, language);
    let outcome = state.orchestrator.respond(&request.text, &ctx).await;
    Json(outcome.into())
}

/// Mandarin voice exchange
async fn transcribe_mandarin(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExchangeResponse>, ServerError> {
    voice_exchange(state, multipart, Language::Mandarin).await
}

/// English voice exchange
async fn transcribe_english(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExchangeResponse>, ServerError> {
    voice_exchange(state, multipart, Language::English).await
}

async fn voice_exchange(
    state: AppState,
    mut multipart: Multipart,
    language: Language,
) -> Result<Json<ExchangeResponse>, ServerError> {
    let mut audio: Option<Vec<u8>> = None;
    let mut conversation_id = DEFAULT_CONVERSATION_ID.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidRequest(format!("Bad multipart body: {}", e)))?
    {
        match field.name() {
            Some("audio") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::InvalidRequest(format!("Bad audio field: {}", e)))?;
                audio = Some(bytes.to_vec());
            }
            Some("conversation_id") => {
                conversation_id = field.text().await.map_err(|e| {
                    ServerError::InvalidRequest(format!("Bad conversation_id field: {}", e))
                })?;
            }
            _ => {}
        }
    }

    let audio =
        audio.ok_or_else(|| ServerError::InvalidRequest("Missing audio field".to_string()))?;

    tracing::info!(
        language = %language,
        conversation_id = %conversation_id,
        audio_bytes = audio.len(),
        "Voice exchange"
    );

    let transcript = state.transcriber.transcribe(&audio, language).await?;
    // transcript canonicalization runs only on the voice path
    let input = apply_corrections(&transcript);

    let ctx = ConversationContext::new(conversation_id, language);
    let outcome = state.orchestrator.respond(&input, &ctx).await;
    Ok(Json(outcome.into()))
}

/// Synthesis request
#[derive(Debug, Deserialize)]
struct TtsRequest {
    text: String,
    voice: Option<String>,
    rate: Option<String>,
    volume: Option<String>,
    pitch: Option<String>,
    #[serde(default)]
    format: AudioFormat,
}

/// Speech synthesis
///
/// The only consumer of the replacement rule store: synthesized-speech text
/// is rule-normalized before it goes to the synthesis service.
async fn synthesize(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let defaults = &state.config.synthesis;
    let spec = SynthesisSpec {
        text: state.rules.apply(&request.text),
        voice: request.voice.unwrap_or_else(|| defaults.voice.clone()),
        rate: request.rate.unwrap_or_else(|| defaults.rate.clone()),
        volume: request.volume.unwrap_or_else(|| defaults.volume.clone()),
        pitch: request.pitch.unwrap_or_else(|| defaults.pitch.clone()),
    };

    tracing::info!(voice = %spec.voice, format = ?request.format, "Synthesis request");

    let audio = state.synthesizer.synthesize(&spec).await?;

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                request.format.media_type().to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", request.format.filename()),
            ),
        ],
        audio,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docent_config::Settings;
    use docent_core::{ScriptConverter, SpeechSynthesizer, Transcriber};
    use docent_dialogue::{ChatBackend, DialogueError, DialogueRouter, Orchestrator};
    use docent_text::{IdentityConverter, RuleStore};
    use std::sync::Arc;

    struct StubBackend;

    #[async_trait]
    impl ChatBackend for StubBackend {
        async fn reply(
            &self,
            _text: &str,
            _conversation_id: &str,
        ) -> Result<Option<String>, DialogueError> {
            Ok(Some("ok".to_string()))
        }

        fn backend_name(&self) -> &str {
            "stub"
        }
    }

    struct StubTranscriber;

    #[async_trait]
    impl Transcriber for StubTranscriber {
        async fn transcribe(
            &self,
            _audio: &[u8],
            _language: Language,
        ) -> docent_core::Result<String> {
            Ok("你好".to_string())
        }
    }

    struct StubSynthesizer;

    #[async_trait]
    impl SpeechSynthesizer for StubSynthesizer {
        async fn synthesize(&self, _spec: &SynthesisSpec) -> docent_core::Result<Vec<u8>> {
            Ok(vec![0u8; 8])
        }
    }

    fn test_state() -> AppState {
        let router = DialogueRouter::new(Arc::new(StubBackend), Arc::new(StubBackend));
        let converter: Arc<dyn ScriptConverter> = Arc::new(IdentityConverter);
        AppState::with_components(
            Settings::default(),
            Arc::new(Orchestrator::new(router, converter)),
            Arc::new(StubTranscriber),
            Arc::new(StubSynthesizer),
            Arc::new(RuleStore::empty()),
        )
    }

    #[test]
    fn test_router_creation() {
        let _ = create_router(test_state());
    }

    #[test]
    fn test_chat_request_defaults_conversation_id() {
        let request: TextChatRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(request.conversation_id, DEFAULT_CONVERSATION_ID);
    }

    #[test]
    fn test_tts_request_defaults() {
        let request: TtsRequest = serde_json::from_str(r#"{"text": "你好"}"#).unwrap();
        assert_eq!(request.format, AudioFormat::Mp3);
        assert!(request.voice.is_none());
    }

    #[test]
    fn test_exchange_response_wire_shape() {
        let outcome = DialogueOutcome::success("你好", "您好", "c1");
        let response = ExchangeResponse::from(outcome);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["input_text"], "你好");
        assert_eq!(json["reply_text"], "您好");
        assert_eq!(json["conversation_id"], "c1");
    }
}
