//! Exhibit voice gateway server
//!
//! HTTP endpoints for the four conversational request shapes
//! (voice/text × Mandarin/English) plus speech synthesis.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors
///
/// Only bad uploads and collaborator calls outside the dialogue router's
/// fallback scope (transcription, synthesis) reach this type. Chat backend
/// trouble never surfaces here; the router folds it into the conversational
/// reply.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<docent_core::Error> for ServerError {
    fn from(err: docent_core::Error) -> Self {
        match err {
            docent_core::Error::Speech(msg) => ServerError::Speech(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Speech(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::from(self), body).into_response()
    }
}
