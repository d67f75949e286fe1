//! Mandarin chat backend (notebook-chat contract)
//!
//! The Mandarin exhibit persona lives behind a notebook-chat service. A turn
//! is posted as `{text, conversation_id, notebook_id}`; the service replies
//! with its full turn list and the assistant reply is the **last** message of
//! type `"ai"` (a list without one carries no reply). The service owns
//! conversation memory, keyed by the caller-supplied `conversation_id`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::backend::ChatBackend;
use crate::DialogueError;

/// Configuration for the notebook-chat backend
#[derive(Debug, Clone)]
pub struct NotebookChatConfig {
    /// Chat endpoint URL
    pub endpoint: String,
    /// Notebook the exhibit persona is bound to
    pub notebook_id: String,
    /// Per-call time budget
    pub timeout: Duration,
}

impl Default for NotebookChatConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8787/api/chat".to_string(),
            notebook_id: "notebook:dev".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Mandarin chat backend
pub struct NotebookChatBackend {
    config: NotebookChatConfig,
    client: Client,
}

impl NotebookChatBackend {
    /// Create the backend over the process-wide HTTP client
    pub fn new(config: NotebookChatConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl ChatBackend for NotebookChatBackend {
    async fn reply(
        &self,
        text: &str,
        conversation_id: &str,
    ) -> Result<Option<String>, DialogueError> {
        let request = NotebookChatRequest {
            text,
            conversation_id,
            notebook_id: &self.config.notebook_id,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DialogueError::UpstreamStatus(status.as_u16()));
        }

        let response: NotebookChatResponse = response
            .json()
            .await
            .map_err(|e| DialogueError::InvalidResponse(e.to_string()))?;

        Ok(response
            .messages
            .into_iter()
            .rev()
            .find(|m| m.kind == "ai")
            .map(|m| m.content))
    }

    fn backend_name(&self) -> &str {
        "notebook-chat"
    }
}

#[derive(Debug, Serialize)]
struct NotebookChatRequest<'a> {
    text: &'a str,
    conversation_id: &'a str,
    notebook_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct NotebookChatResponse {
    messages: Vec<NotebookMessage>,
}

#[derive(Debug, Deserialize)]
struct NotebookMessage {
    #[serde(rename = "type")]
    kind: String,
    content: String,
}
