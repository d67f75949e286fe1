//! Speech clients for the exhibit voice gateway
//!
//! Thin HTTP wrappers around the two audio collaborators:
//! - [`HttpTranscriber`]: posts an utterance to the recognition service and
//!   concatenates the returned transcript fragments, optionally boosting a
//!   per-language phrase list loaded at startup.
//! - [`HttpSynthesizer`]: posts a synthesis spec and drains the audio chunk
//!   stream into a single buffer.
//!
//! Neither component decodes or encodes audio; bytes pass through untouched.

pub mod phrases;
pub mod stt;
pub mod tts;

pub use phrases::PhraseList;
pub use stt::{HttpTranscriber, RecognizerConfig};
pub use tts::{HttpSynthesizer, SynthesizerConfig};

use thiserror::Error;

/// Speech client errors
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SpeechError::Timeout
        } else {
            SpeechError::Network(err.to_string())
        }
    }
}

impl From<SpeechError> for docent_core::Error {
    fn from(err: SpeechError) -> Self {
        docent_core::Error::Speech(err.to_string())
    }
}
