//! English chat backend (custom-service contract)
//!
//! English turns go to a custom-service endpoint with bearer-token auth. The
//! payload wraps the text in a message envelope attributed to a fixed
//! simulated end-user identity; the service keys its memory on that identity,
//! so the gateway's `conversation_id` is not transmitted, only echoed
//! back to the caller in the outcome.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::backend::ChatBackend;
use crate::DialogueError;

/// Configuration for the custom-service backend
#[derive(Debug, Clone)]
pub struct CustomServiceConfig {
    /// Chat endpoint URL (language is selected via the endpoint itself)
    pub endpoint: String,
    /// Bearer token; comes from configuration, never compiled in
    pub bearer_token: String,
    /// Simulated end-user identity the service keys memory on
    pub user_id: String,
    /// Per-call time budget
    pub timeout: Duration,
}

impl Default for CustomServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8899/custom_service_with_language?language=english"
                .to_string(),
            bearer_token: String::new(),
            user_id: "local-dev-user".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// English chat backend
pub struct CustomServiceBackend {
    config: CustomServiceConfig,
    client: Client,
}

impl CustomServiceBackend {
    /// Create the backend over the process-wide HTTP client
    pub fn new(config: CustomServiceConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl ChatBackend for CustomServiceBackend {
    async fn reply(
        &self,
        text: &str,
        _conversation_id: &str,
    ) -> Result<Option<String>, DialogueError> {
        let request = CustomServiceRequest {
            kind: "message",
            message: TextMessage { kind: "text", text },
            source: UserSource {
                kind: "user",
                user_id: &self.config.user_id,
            },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.bearer_token)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DialogueError::UpstreamStatus(status.as_u16()));
        }

        let response: CustomServiceResponse = response
            .json()
            .await
            .map_err(|e| DialogueError::InvalidResponse(e.to_string()))?;

        Ok(response.message)
    }

    fn backend_name(&self) -> &str {
        "custom-service"
    }
}

#[derive(Debug, Serialize)]
struct CustomServiceRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    message: TextMessage<'a>,
    source: UserSource<'a>,
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct UserSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "userId")]
    user_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CustomServiceResponse {
    #[serde(default)]
    message: Option<String>,
}
