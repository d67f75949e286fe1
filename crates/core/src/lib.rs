//! Core types and traits for the exhibit voice gateway
//!
//! This crate provides the foundational pieces shared by all other crates:
//! - `Language`: the two languages the kiosk speaks
//! - Conversation types (`ConversationContext`, `DialogueOutcome`)
//! - Synthesis types (`SynthesisSpec`, `AudioFormat`)
//! - Collaborator traits for pluggable backends (transcription, synthesis,
//!   script conversion)
//! - Error types

pub mod conversation;
pub mod error;
pub mod language;
pub mod traits;
pub mod voice;

pub use conversation::{ConversationContext, DialogueOutcome, DialogueStatus};
pub use error::{Error, Result};
pub use language::Language;
pub use voice::{AudioFormat, SynthesisSpec};

pub use traits::{ScriptConverter, SpeechSynthesizer, Transcriber};
