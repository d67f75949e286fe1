//! Simplified→Traditional script conversion
//!
//! Conversion is a character-for-character table lookup, loaded once from a
//! JSON mapping file (`{"么": "麼", ...}`). Unmapped characters pass through,
//! so an empty table degrades to the identity function: the gateway keeps
//! serving if the table is missing, it just stops converting.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use docent_core::ScriptConverter;

/// Table-driven converter
#[derive(Debug, Default)]
pub struct CharTableConverter {
    table: HashMap<char, char>,
}

impl CharTableConverter {
    /// Load the mapping table, failing softly to an empty (identity) table
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not read script table, conversion disabled"
                );
                return Self::default();
            }
        };

        let entries: HashMap<String, String> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not parse script table, conversion disabled"
                );
                return Self::default();
            }
        };

        let mut table = HashMap::with_capacity(entries.len());
        for (from, to) in &entries {
            match (single_char(from), single_char(to)) {
                (Some(from), Some(to)) => {
                    table.insert(from, to);
                }
                _ => {
                    tracing::warn!(from = %from, to = %to, "Skipping non-single-character script mapping");
                }
            }
        }

        tracing::info!(count = table.len(), path = %path.display(), "Loaded script table");
        Self { table }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        Self {
            table: pairs.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl ScriptConverter for CharTableConverter {
    fn convert(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.table.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

/// Pass-through converter, used in tests and for deployments that disable
/// script conversion
#[derive(Debug, Default)]
pub struct IdentityConverter;

impl ScriptConverter for IdentityConverter {
    fn convert(&self, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mapped_and_unmapped_characters() {
        let converter = CharTableConverter::from_pairs([('么', '麼'), ('后', '後')]);
        assert_eq!(converter.convert("什么在后面"), "什麼在後面");
        assert_eq!(converter.convert("already 繁體"), "already 繁體");
    }

    #[test]
    fn test_missing_table_is_identity() {
        let converter = CharTableConverter::load("/nonexistent/s2t.json");
        assert!(converter.is_empty());
        assert_eq!(converter.convert("什么"), "什么");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"么": "麼", "bad": "entry"}}"#).unwrap();
        let converter = CharTableConverter::load(file.path());
        assert_eq!(converter.len(), 1);
        assert_eq!(converter.convert("什么"), "什麼");
    }

    #[test]
    fn test_identity_converter() {
        assert_eq!(IdentityConverter.convert("什么"), "什么");
    }
}
