//! GET / -- the chat page.

use axum::extract::State;
use axum::response::Html;
use minijinja::context;

use crate::http::error::AppError;
use crate::http::extractors::session::BrowserSession;
use crate::http::templates::INDEX;
use crate::state::AppState;

/// Seed the session if needed and render its conversation.
pub async fn index(
    State(state): State<AppState>,
    session: BrowserSession,
) -> (BrowserSession, Result<Html<String>, AppError>) {
    let page = render_index(&state, &session).await;
    (session, page)
}

async fn render_index(state: &AppState, session: &BrowserSession) -> Result<Html<String>, AppError> {
    let log = state.chat_service.initialize_session(&session.id).await?;

    let html = state
        .templates
        .get_template(INDEX)
        .and_then(|t| t.render(context! { chat_history => log.turns() }))
        .map_err(|e| AppError::Internal(format!("failed to render page: {e}")))?;

    Ok(Html(html))
}
