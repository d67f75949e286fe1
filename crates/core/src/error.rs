//! Error types shared across the gateway

use thiserror::Error;

/// Gateway-wide error type
///
/// Crate-local errors (`SpeechError`, `DialogueError`, ...) convert into this
/// at the seams where a shared type is needed.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Dialogue error: {0}")]
    Dialogue(String),

    #[error("Text processing error: {0}")]
    Text(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias using the gateway error type
pub type Result<T> = std::result::Result<T, Error>;
