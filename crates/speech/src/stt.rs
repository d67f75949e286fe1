//! Speech recognition client
//!
//! The recognition engine is consumed as a black box over HTTP. An utterance
//! is posted as base64 audio plus the recognition locale; the service answers
//! with transcript fragments which are concatenated in order. A per-language
//! boost phrase list tilts recognition toward the exhibit vocabulary.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use docent_core::{Language, Result, Transcriber};

use crate::phrases::PhraseList;
use crate::SpeechError;

/// Configuration for the recognition client
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// Recognition service URL
    pub endpoint: String,
    /// PCM sample rate of uploaded audio
    pub sample_rate_hertz: u32,
    /// Boost weight applied to the phrase list
    pub phrase_boost: f32,
    /// Per-call time budget
    pub timeout: Duration,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8091/recognize".to_string(),
            sample_rate_hertz: 16_000,
            phrase_boost: 20.0,
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP transcription client
pub struct HttpTranscriber {
    config: RecognizerConfig,
    client: Client,
    mandarin_phrases: PhraseList,
    english_phrases: PhraseList,
}

impl HttpTranscriber {
    /// Create the client over the process-wide HTTP client
    pub fn new(
        config: RecognizerConfig,
        client: Client,
        mandarin_phrases: PhraseList,
        english_phrases: PhraseList,
    ) -> Self {
        Self {
            config,
            client,
            mandarin_phrases,
            english_phrases,
        }
    }

    fn phrases_for(&self, language: Language) -> &PhraseList {
        match language {
            Language::Mandarin => &self.mandarin_phrases,
            Language::English => &self.english_phrases,
        }
    }

    async fn recognize(&self, audio: &[u8], language: Language) -> std::result::Result<String, SpeechError> {
        let request = RecognizeRequest {
            audio: BASE64.encode(audio),
            language_code: language.bcp47(),
            sample_rate_hertz: self.config.sample_rate_hertz,
            enable_automatic_punctuation: true,
            phrases: self.phrases_for(language).as_slice(),
            boost: self.config.phrase_boost,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::UpstreamStatus(status.as_u16()));
        }

        let response: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?;

        let transcript = concat_fragments(&response);
        tracing::info!(
            language = %language,
            chars = transcript.chars().count(),
            "Transcription complete"
        );
        Ok(transcript)
    }
}

/// Concatenate transcript fragments in service order
fn concat_fragments(response: &RecognizeResponse) -> String {
    response
        .results
        .iter()
        .map(|r| r.transcript.as_str())
        .collect()
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<String> {
        Ok(self.recognize(audio, language).await?)
    }
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    audio: String,
    language_code: &'a str,
    sample_rate_hertz: u32,
    enable_automatic_punctuation: bool,
    phrases: &'a [String],
    boost: f32,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    transcript: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let phrases = vec!["益生菌".to_string()];
        let request = RecognizeRequest {
            audio: BASE64.encode(b"pcm"),
            language_code: Language::Mandarin.bcp47(),
            sample_rate_hertz: 16_000,
            enable_automatic_punctuation: true,
            phrases: &phrases,
            boost: 20.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["language_code"], "zh-TW");
        assert_eq!(json["sample_rate_hertz"], 16_000);
        assert_eq!(json["phrases"][0], "益生菌");
    }

    #[test]
    fn test_fragments_concatenated_in_order() {
        let response: RecognizeResponse = serde_json::from_str(
            r#"{"results": [{"transcript": "我們做"}, {"transcript": "代工"}]}"#,
        )
        .unwrap();
        assert_eq!(concat_fragments(&response), "我們做代工");
    }

    #[test]
    fn test_no_results_is_empty_transcript() {
        let response: RecognizeResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(concat_fragments(&response), "");
    }
}
