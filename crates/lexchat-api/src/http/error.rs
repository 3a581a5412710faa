//! Application error type mapping to the chat page's JSON error shape.
//!
//! Every failure surfaces as `500 {"error": "An error occurred: <message>"}`;
//! the page's script shows the message in the conversation.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use lexchat_types::error::ChatError;

#[derive(Debug)]
pub enum AppError {
    /// Chat service failure (upstream model or session store).
    Chat(ChatError),
    /// Request body could not be read as the expected JSON.
    Payload(String),
    /// Anything else (template rendering, ...).
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn message(&self) -> String {
        match self {
            AppError::Chat(e) => e.to_string(),
            AppError::Payload(msg) | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.message();
        tracing::error!(error = %message, "request failed");

        let body = json!({ "error": format!("An error occurred: {message}") });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
