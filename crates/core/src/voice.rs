//! Synthesis request types
//!
//! Mirrors the knobs exposed by the synthesis service: a neural voice name
//! and percent/Hz adjustments encoded as strings ("+0%", "-10%", "+2Hz").

use serde::{Deserialize, Serialize};

/// One synthesis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisSpec {
    /// Text to speak (already rule-normalized by the caller)
    pub text: String,
    /// Voice name, e.g. "zh-TW-HsiaoChenNeural"
    pub voice: String,
    /// Speaking rate adjustment, "-50%" to "+100%"
    pub rate: String,
    /// Volume adjustment, "-50%" to "+100%"
    pub volume: String,
    /// Pitch adjustment, e.g. "+0Hz"
    pub pitch: String,
}

/// Container format of the returned audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl Default for AudioFormat {
    fn default() -> Self {
        AudioFormat::Mp3
    }
}

impl AudioFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "speech.mp3",
            AudioFormat::Wav => "speech.wav",
        }
    }
}
