//! Language definitions
//!
//! The kiosk serves exactly two audiences: Mandarin (Traditional script,
//! Taiwan locale) and English. The language tag selects the recognition
//! locale, the chat backend contract, and the fallback wording.

use serde::{Deserialize, Serialize};

/// Target language of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Mandarin, Traditional script (zh-TW)
    #[serde(rename = "zh")]
    Mandarin,
    /// English (en-US)
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// BCP-47 code used by the recognition service
    pub fn bcp47(&self) -> &'static str {
        match self {
            Language::Mandarin => "zh-TW",
            Language::English => "en-US",
        }
    }

    /// Short tag used in logs and wire payloads
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Mandarin => "zh",
            Language::English => "en",
        }
    }

    /// Parse a loose language identifier ("zh", "zh-TW", "english", ...)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "zh" | "zh-tw" | "zh_tw" | "mandarin" | "chinese" => Some(Language::Mandarin),
            "en" | "en-us" | "en_us" | "english" => Some(Language::English),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcp47_codes() {
        assert_eq!(Language::Mandarin.bcp47(), "zh-TW");
        assert_eq!(Language::English.bcp47(), "en-US");
    }

    #[test]
    fn test_from_str_loose() {
        assert_eq!(Language::from_str_loose("zh-TW"), Some(Language::Mandarin));
        assert_eq!(Language::from_str_loose("English"), Some(Language::English));
        assert_eq!(Language::from_str_loose("fr"), None);
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&Language::Mandarin).unwrap(), "\"zh\"");
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
    }
}
