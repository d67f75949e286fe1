//! Replacement rule store
//!
//! Rules live in a JSON file next to the other deployment data and are
//! loaded once at startup:
//!
//! ```json
//! [
//!   { "pattern": "(?i)OEM", "replacement": "O E M", "flags": ["IGNORECASE"] }
//! ]
//! ```
//!
//! Ordering is significant: rules apply sequentially, each rule operating on
//! the previous rule's output, so a replacement may itself be rewritten by a
//! later rule. Whether that chain converges is the rule author's
//! responsibility, not an engine guarantee.
//!
//! Loading fails softly. A missing or unparseable file yields an empty store
//! (plus a warning); an individual rule whose pattern does not compile is
//! skipped without affecting the rest.

use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

/// Matching-mode toggles, named as they appear in the rule file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RuleFlag {
    #[serde(rename = "IGNORECASE")]
    IgnoreCase,
    #[serde(rename = "MULTILINE")]
    Multiline,
    #[serde(rename = "DOTALL")]
    DotAll,
}

/// One rule as declared in the file
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    /// Replacement text; capture groups are referenced as `$1`, `${name}`
    pub replacement: String,
    #[serde(default)]
    pub flags: Vec<RuleFlag>,
}

/// A compiled rule
#[derive(Debug)]
pub struct NormalizationRule {
    regex: Regex,
    replacement: String,
}

impl NormalizationRule {
    fn compile(spec: &RuleSpec) -> Result<Self, regex::Error> {
        let mut builder = RegexBuilder::new(&spec.pattern);
        for flag in &spec.flags {
            match flag {
                RuleFlag::IgnoreCase => builder.case_insensitive(true),
                RuleFlag::Multiline => builder.multi_line(true),
                RuleFlag::DotAll => builder.dot_matches_new_line(true),
            };
        }
        Ok(Self {
            regex: builder.build()?,
            replacement: spec.replacement.clone(),
        })
    }

    fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Ordered, immutable set of replacement rules
///
/// Read-only after load; safe for unlimited concurrent readers.
#[derive(Debug, Default)]
pub struct RuleStore {
    rules: Vec<NormalizationRule>,
}

impl RuleStore {
    /// Store with no rules; `apply` becomes the identity
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load rules from a JSON file, failing softly
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not read replacement rules, starting with an empty store"
                );
                return Self::empty();
            }
        };

        let specs: Vec<RuleSpec> = match serde_json::from_str(&raw) {
            Ok(specs) => specs,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not parse replacement rules, starting with an empty store"
                );
                return Self::empty();
            }
        };

        let store = Self::from_specs(&specs);
        tracing::info!(count = store.len(), path = %path.display(), "Loaded replacement rules");
        store
    }

    /// Compile rules in declared order, skipping invalid patterns
    pub fn from_specs(specs: &[RuleSpec]) -> Self {
        let mut rules = Vec::with_capacity(specs.len());
        for spec in specs {
            match NormalizationRule::compile(spec) {
                Ok(rule) => rules.push(rule),
                Err(e) => {
                    tracing::warn!(
                        pattern = %spec.pattern,
                        error = %e,
                        "Skipping replacement rule with invalid pattern"
                    );
                }
            }
        }
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in load order
    pub fn apply(&self, text: &str) -> String {
        if self.rules.is_empty() {
            return text.to_string();
        }
        let mut out = text.to_string();
        for rule in &self.rules {
            out = rule.apply(&out);
        }
        out
    }
}
