//! Text normalization for the exhibit voice gateway
//!
//! Two independent normalization stages, never merged or reordered:
//! - **Corrections**: a fixed, code-defined substitution chain that
//!   canonicalizes domain abbreviations and trims a trailing full stop.
//!   Runs over voice transcripts and over backend-produced replies.
//! - **Replacement rules**: an ordered, file-loaded regex rule list.
//!   Runs only over text bound for speech synthesis.
//!
//! The crate also provides reply post-processing (emphasis-marker stripping
//! for Mandarin replies) and the Simplified→Traditional script converter.
//!
//! Everything here is a pure function over data loaded once at startup;
//! all types are safe to share across concurrent requests.

pub mod corrections;
pub mod reply;
pub mod rules;
pub mod script;

pub use corrections::apply_corrections;
pub use reply::finalize_reply;
pub use rules::{NormalizationRule, RuleFlag, RuleSpec, RuleStore};
pub use script::{CharTableConverter, IdentityConverter};
