//! Speech collaborator traits

use async_trait::async_trait;

use crate::{Language, Result, SynthesisSpec};

/// Speech-to-text interface
///
/// The recognition engine is a black box: it receives raw audio bytes plus a
/// language code and returns transcript fragments, which the implementation
/// concatenates in order into a single transcript.
///
/// # Example
///
/// ```ignore
/// let stt: Arc<dyn Transcriber> = Arc::new(HttpTranscriber::new(config, client));
/// let transcript = stt.transcribe(&audio_bytes, Language::Mandarin).await?;
/// ```
#[async_trait]
pub trait Transcriber: Send + Sync + 'static {
    /// Transcribe one utterance
    ///
    /// Returns the concatenated transcript, possibly empty when nothing was
    /// recognized. An empty transcript is not an error.
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<String>;
}

/// Text-to-speech interface
///
/// The synthesis engine produces a lazy, finite, non-restartable chunk
/// stream; implementations drain it and hand back one contiguous buffer.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Synthesize the spec into a single audio buffer
    async fn synthesize(&self, spec: &SynthesisSpec) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedTranscriber;

    #[async_trait]
    impl Transcriber for CannedTranscriber {
        async fn transcribe(&self, _audio: &[u8], _language: Language) -> Result<String> {
            Ok("你好".to_string())
        }
    }

    #[tokio::test]
    async fn test_transcriber_object_safety() {
        let stt: Box<dyn Transcriber> = Box::new(CannedTranscriber);
        let text = stt.transcribe(&[0u8; 4], Language::Mandarin).await.unwrap();
        assert_eq!(text, "你好");
    }
}
