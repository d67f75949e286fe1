//! Recognition boost phrases
//!
//! Exhibit vocabulary (product lines, certification names) that the
//! recognition service should favor. One phrase per line, blank lines
//! ignored. Loading fails softly: a missing file just means no boosting.

use std::fs;
use std::path::Path;

/// Immutable phrase list loaded at startup
#[derive(Debug, Clone, Default)]
pub struct PhraseList {
    phrases: Vec<String>,
}

impl PhraseList {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load one phrase per line, failing softly to an empty list
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not read boost phrases, recognition will run unboosted"
                );
                return Self::empty();
            }
        };

        let phrases: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        tracing::info!(count = phrases.len(), path = %path.display(), "Loaded boost phrases");
        Self { phrases }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
