//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat backend configuration
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Speech recognition configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Speech synthesis configuration
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Text normalization data files
    #[serde(default)]
    pub text: TextConfig,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        for (field, value) in [
            ("dialogue.timeout_seconds", self.dialogue.timeout_seconds),
            ("speech.timeout_seconds", self.speech.timeout_seconds),
            ("synthesis.timeout_seconds", self.synthesis.timeout_seconds),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Timeout must be at least 1 second".to_string(),
                });
            }
        }

        if self.speech.sample_rate_hertz == 0 {
            return Err(ConfigError::InvalidValue {
                field: "speech.sample_rate_hertz".to_string(),
                message: "Sample rate cannot be 0".to_string(),
            });
        }

        if self.dialogue.english.bearer_token.is_empty() {
            tracing::warn!(
                "No bearer token configured for the English backend; \
                 calls will be rejected upstream. Set DOCENT__DIALOGUE__ENGLISH__BEARER_TOKEN."
            );
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins; empty means permissive (kiosk frontends are
    /// served from rotating exhibition hosts)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_true(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3566
}

fn default_true() -> bool {
    true
}

/// Chat backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Per-call time budget for both backends
    #[serde(default = "default_dialogue_timeout")]
    pub timeout_seconds: u64,

    /// Mandarin (notebook-chat) backend
    #[serde(default)]
    pub mandarin: MandarinBackendConfig,

    /// English (custom-service) backend
    #[serde(default)]
    pub english: EnglishBackendConfig,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_dialogue_timeout(),
            mandarin: MandarinBackendConfig::default(),
            english: EnglishBackendConfig::default(),
        }
    }
}

fn default_dialogue_timeout() -> u64 {
    30
}

/// Mandarin chat backend coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandarinBackendConfig {
    #[serde(default = "default_mandarin_endpoint")]
    pub endpoint: String,

    /// Notebook the exhibit persona is bound to
    #[serde(default = "default_notebook_id")]
    pub notebook_id: String,
}

impl Default for MandarinBackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_mandarin_endpoint(),
            notebook_id: default_notebook_id(),
        }
    }
}

fn default_mandarin_endpoint() -> String {
    "http://localhost:8787/api/chat".to_string()
}

fn default_notebook_id() -> String {
    "notebook:dev".to_string()
}

/// English chat backend coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnglishBackendConfig {
    #[serde(default = "default_english_endpoint")]
    pub endpoint: String,

    /// Bearer token; set via environment, never committed
    #[serde(default)]
    pub bearer_token: String,

    /// Simulated end-user identity the service keys memory on
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for EnglishBackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_english_endpoint(),
            bearer_token: String::new(),
            user_id: default_user_id(),
        }
    }
}

fn default_english_endpoint() -> String {
    "http://localhost:8899/custom_service_with_language?language=english".to_string()
}

fn default_user_id() -> String {
    "local-dev-user".to_string()
}

/// Speech recognition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// PCM sample rate of uploaded audio
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hertz: u32,

    /// Boost weight applied to the phrase lists
    #[serde(default = "default_phrase_boost")]
    pub phrase_boost: f32,

    #[serde(default = "default_speech_timeout")]
    pub timeout_seconds: u64,

    /// Mandarin boost phrase file (one phrase per line)
    #[serde(default = "default_mandarin_phrases_path")]
    pub mandarin_phrases_path: String,

    /// English boost phrase file
    #[serde(default = "default_english_phrases_path")]
    pub english_phrases_path: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: default_speech_endpoint(),
            sample_rate_hertz: default_sample_rate(),
            phrase_boost: default_phrase_boost(),
            timeout_seconds: default_speech_timeout(),
            mandarin_phrases_path: default_mandarin_phrases_path(),
            english_phrases_path: default_english_phrases_path(),
        }
    }
}

fn default_speech_endpoint() -> String {
    "http://localhost:8091/recognize".to_string()
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_phrase_boost() -> f32 {
    20.0
}

fn default_speech_timeout() -> u64 {
    30
}

fn default_mandarin_phrases_path() -> String {
    "config/phrases_zh.txt".to_string()
}

fn default_english_phrases_path() -> String {
    "config/phrases_en.txt".to_string()
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    #[serde(default = "default_synthesis_endpoint")]
    pub endpoint: String,

    /// Default voice when the request names none
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Speaking rate adjustment, "-50%" to "+100%"
    #[serde(default = "default_percent")]
    pub rate: String,

    /// Volume adjustment, "-50%" to "+100%"
    #[serde(default = "default_percent")]
    pub volume: String,

    /// Pitch adjustment
    #[serde(default = "default_pitch")]
    pub pitch: String,

    #[serde(default = "default_synthesis_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: default_synthesis_endpoint(),
            voice: default_voice(),
            rate: default_percent(),
            volume: default_percent(),
            pitch: default_pitch(),
            timeout_seconds: default_synthesis_timeout(),
        }
    }
}

fn default_synthesis_endpoint() -> String {
    "http://localhost:8092/synthesize".to_string()
}

fn default_voice() -> String {
    "zh-TW-HsiaoChenNeural".to_string()
}

fn default_percent() -> String {
    "+0%".to_string()
}

fn default_pitch() -> String {
    "+0Hz".to_string()
}

fn default_synthesis_timeout() -> u64 {
    30
}

/// Text normalization data files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Replacement rule file (JSON, ordered)
    #[serde(default = "default_replacements_path")]
    pub replacements_path: String,

    /// Simplified→Traditional character table (JSON)
    #[serde(default = "default_script_table_path")]
    pub script_table_path: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            replacements_path: default_replacements_path(),
            script_table_path: default_script_table_path(),
        }
    }
}

fn default_replacements_path() -> String {
    "config/replacements.json".to_string()
}

fn default_script_table_path() -> String {
    "config/s2t.json".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON-structured logs
    #[serde(default)]
    pub log_json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load settings from files and environment
///
/// Priority: env vars > `config/{env}.yaml` > `config/default.yaml` > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("DOCENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 3566);
        assert_eq!(settings.dialogue.timeout_seconds, 30);
        assert_eq!(settings.synthesis.voice, "zh-TW-HsiaoChenNeural");
        assert_eq!(settings.speech.sample_rate_hertz, 16_000);
    }

    #[test]
    fn test_validation_rejects_zero_port() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.dialogue.timeout_seconds = 0;
        assert!(settings.validate().is_err());

        settings.dialogue.timeout_seconds = 30;
        assert!(settings.validate().is_ok());
    }
}
