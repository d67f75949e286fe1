//! Collaborator traits
//!
//! The recognition service, the synthesis service, and the script converter
//! are external capabilities consumed behind these seams; implementations
//! live in the `docent-speech` and `docent-text` crates.

mod script;
mod speech;

pub use script::ScriptConverter;
pub use speech::{SpeechSynthesizer, Transcriber};
