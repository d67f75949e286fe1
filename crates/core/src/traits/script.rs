//! Script conversion trait

/// Simplified→Traditional script conversion
///
/// Total and side-effect-free: every input maps to exactly one output and
/// unmapped characters pass through unchanged. Implementations must be safe
/// to share across concurrent requests.
pub trait ScriptConverter: Send + Sync + 'static {
    fn convert(&self, text: &str) -> String;
}
