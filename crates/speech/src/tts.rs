//! Speech synthesis client
//!
//! The synthesis service streams audio chunks for a `{text, voice, rate,
//! volume, pitch}` request. The stream is finite and non-restartable, so the
//! client drains it fully and hands back one contiguous buffer; the HTTP
//! layer serves that buffer as a single download.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;

use docent_core::{Result, SpeechSynthesizer, SynthesisSpec};

use crate::SpeechError;

/// Configuration for the synthesis client
#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    /// Synthesis service URL
    pub endpoint: String,
    /// Per-call time budget (covers the whole stream)
    pub timeout: Duration,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8092/synthesize".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP synthesis client
pub struct HttpSynthesizer {
    config: SynthesizerConfig,
    client: Client,
}

impl HttpSynthesizer {
    /// Create the client over the process-wide HTTP client
    pub fn new(config: SynthesizerConfig, client: Client) -> Self {
        Self { config, client }
    }

    async fn stream_audio(&self, spec: &SynthesisSpec) -> std::result::Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(spec)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::UpstreamStatus(status.as_u16()));
        }

        let mut audio = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(SpeechError::from)?;
            audio.extend_from_slice(&chunk);
        }

        tracing::info!(bytes = audio.len(), voice = %spec.voice, "Synthesis complete");
        Ok(audio)
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(&self, spec: &SynthesisSpec) -> Result<Vec<u8>> {
        Ok(self.stream_audio(spec).await?)
    }
}
