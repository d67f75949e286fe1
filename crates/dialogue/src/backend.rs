//! Chat backend trait

use async_trait::async_trait;

use crate::DialogueError;

/// One remote chat backend: send text, get a reply
///
/// Implementations make exactly one outbound call per `reply` invocation and
/// never retry; recovering from failure is the router's job. The
/// `conversation_id` is forwarded verbatim where the backend's contract uses
/// one and ignored otherwise.
#[async_trait]
pub trait ChatBackend: Send + Sync + 'static {
    /// Send one user turn and extract the assistant reply
    ///
    /// `Ok(None)` means the call succeeded but the response carried no
    /// extractable reply (e.g. an empty turn list); the router substitutes
    /// the language's could-not-understand default.
    async fn reply(
        &self,
        text: &str,
        conversation_id: &str,
    ) -> Result<Option<String>, DialogueError>;

    /// Backend name for logging
    fn backend_name(&self) -> &str;
}
