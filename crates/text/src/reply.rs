//! Reply post-processing
//!
//! Backend replies pass through the correction chain before they are shown
//! or spoken. The Mandarin backend additionally formats emphasis with
//! asterisk runs (`**很好**`), which read as noise on the kiosk display and
//! in synthesized speech, so those runs are removed for Mandarin replies
//! only.

use once_cell::sync::Lazy;
use regex::Regex;

use docent_core::Language;

use crate::corrections::apply_corrections;

static EMPHASIS_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").unwrap());

/// Finalize a backend reply for the caller-facing response
pub fn finalize_reply(reply: &str, language: Language) -> String {
    let corrected = apply_corrections(reply);
    match language {
        Language::Mandarin => EMPHASIS_RUNS.replace_all(&corrected, "").into_owned(),
        Language::English => corrected,
    }
}
