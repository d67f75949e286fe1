//! Configuration for the exhibit voice gateway
//!
//! Settings layer in priority order:
//! - `DOCENT__`-prefixed environment variables
//! - `config/{env}.yaml` (selected via `DOCENT_ENV`)
//! - `config/default.yaml`
//! - compiled-in defaults
//!
//! Everything is loaded once at startup into an immutable snapshot; there is
//! no reload path. Secrets (the English backend's bearer token) come from the
//! environment, e.g. `DOCENT__DIALOGUE__ENGLISH__BEARER_TOKEN`.

pub mod settings;

pub use settings::{
    load_settings, DialogueConfig, EnglishBackendConfig, MandarinBackendConfig,
    ObservabilityConfig, ServerConfig, Settings, SpeechConfig, SynthesisConfig, TextConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
