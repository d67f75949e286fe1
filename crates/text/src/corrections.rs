//! Built-in correction chain
//!
//! Canonicalizes domain abbreviations that speech recognition tends to break
//! apart ("O.E.M", "o e m" → "OEM") and fixes one recurring phrasing issue in
//! backend replies. Entries apply in order, each operating on the previous
//! entry's output, and every entry is case-insensitive.
//!
//! The abbreviation patterns anchor on non-letter boundaries so that words
//! merely containing the letter sequence (e.g. "Halal" around H-A-L-A) are
//! left alone. `regex` has no look-around, so the boundaries are captured
//! and re-inserted by the replacement.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed correction table, applied in order
const CORRECTION_TABLE: &[(&str, &str)] = &[
    (r"(?i)(^|[^A-Za-z])O\W*E\W*M([^A-Za-z]|$)", "${1}OEM${2}"),
    (r"(?i)(^|[^A-Za-z])O\W*D\W*M([^A-Za-z]|$)", "${1}ODM${2}"),
    (r"(?i)(^|[^A-Za-z])M\W*O\W*Q([^A-Za-z]|$)", "${1}MOQ${2}"),
    (r"(?i)(^|[^A-Za-z])G\W*M\W*P([^A-Za-z]|$)", "${1}GMP${2}"),
    (r"(?i)(^|[^A-Za-z])I\W*S\W*O([^A-Za-z]|$)", "${1}ISO${2}"),
    (r"(?i)(^|[^A-Za-z])H\W*A\W*L\W*A([^A-Za-z]|$)", "${1}Halal${2}"),
    (r"(?i)(^|[^A-Za-z])S\W*P\W*F([^A-Za-z]|$)", "${1}SPF${2}"),
    (r"(?i)(^|[^A-Za-z])C\W*O\W*A([^A-Za-z]|$)", "${1}COA${2}"),
    (r"(?i)(^|[^A-Za-z])E\W*G\W*F([^A-Za-z]|$)", "${1}EGF${2}"),
    (r"產品品質", "產品的品質"),
];

static CORRECTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    CORRECTION_TABLE
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
});

/// Apply the fixed correction chain, then strip one trailing full stop
///
/// The trailing `。` strip removes at most one character, and only when it is
/// the final character of the string.
pub fn apply_corrections(text: &str) -> String {
    let mut out = text.to_string();
    for (regex, replacement) in CORRECTIONS.iter() {
        out = regex.replace_all(&out, *replacement).into_owned();
    }
    match out.strip_suffix('。') {
        Some(stripped) => stripped.to_string(),
        None => out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_canonicalization() {
        assert_eq!(apply_corrections("我們做 O.E.M 代工"), "我們做 OEM 代工");
        assert_eq!(apply_corrections("o e m 跟 o-d-m"), "OEM 跟 ODM");
        assert_eq!(apply_corrections("最低 m.o.q 是多少"), "最低 MOQ 是多少");
        assert_eq!(apply_corrections("通過 g m p 認證"), "通過 GMP 認證");
    }

    #[test]
    fn test_embedded_sequences_left_alone() {
        // "Halal" contains H-A-L-A but sits inside a word
        assert_eq!(apply_corrections("Halal certified"), "Halal certified");
        assert_eq!(apply_corrections("取得 h a l a 認證"), "取得 Halal 認證");
    }

    #[test]
    fn test_phrase_fix() {
        assert_eq!(apply_corrections("產品品質很好"), "產品的品質很好");
        // already canonical: no further rewrite
        assert_eq!(apply_corrections("產品的品質很好"), "產品的品質很好");
    }

    #[test]
    fn test_trailing_full_stop() {
        assert_eq!(apply_corrections("你好。"), "你好");
        // only the final character, only one
        assert_eq!(apply_corrections("你好。再見"), "你好。再見");
        assert_eq!(apply_corrections("。"), "");
        // western period is not touched
        assert_eq!(apply_corrections("Hello."), "Hello.");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "我們做 O.E.M 代工",
            "產品品質很好。",
            "通過 ISO 與 GMP 認證",
            "Sorry, I am having some trouble. Please talk to me again.",
            "",
        ] {
            let once = apply_corrections(input);
            let twice = apply_corrections(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(apply_corrections(""), "");
    }
}
