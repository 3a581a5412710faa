//! JSON chat endpoints used by the page's script.
//!
//! - `POST /send_message` -- `{"message": "..."}` -> `{"success": true, "bot_response": "..."}`
//! - `POST /clear_chat` -- reset to the greeting -> `{"success": true}`
//! - `GET /history` -- `{"chat_history": [{"role", "text"}, ...]}`

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use lexchat_types::chat::Turn;

use crate::http::error::AppError;
use crate::http::extractors::session::BrowserSession;
use crate::state::AppState;

/// Request body for `POST /send_message`. A missing `message` is empty.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub bot_response: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub chat_history: Vec<Turn>,
}

pub async fn send_message(
    State(state): State<AppState>,
    session: BrowserSession,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> (BrowserSession, Result<Json<SendMessageResponse>, AppError>) {
    let result = exchange(&state, &session, payload).await;
    (session, result)
}

async fn exchange(
    state: &AppState,
    session: &BrowserSession,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Payload(e.body_text()))?;

    let bot_response = state
        .chat_service
        .send_message(&session.id, &request.message)
        .await?;

    Ok(Json(SendMessageResponse {
        success: true,
        bot_response,
    }))
}

pub async fn clear_chat(
    State(state): State<AppState>,
    session: BrowserSession,
) -> (BrowserSession, Result<Json<Value>, AppError>) {
    let result = state
        .chat_service
        .reset(&session.id)
        .await
        .map(|_| Json(json!({ "success": true })))
        .map_err(AppError::from);
    (session, result)
}

/// Current session's log. Does not seed a greeting.
pub async fn history(
    State(state): State<AppState>,
    session: BrowserSession,
) -> (BrowserSession, Result<Json<HistoryResponse>, AppError>) {
    let result = state
        .chat_service
        .history(&session.id)
        .await
        .map(|log| {
            Json(HistoryResponse {
                chat_history: log.into_turns(),
            })
        })
        .map_err(AppError::from);
    (session, result)
}
