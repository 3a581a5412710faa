//! Chat service orchestrating the session lifecycle and one message exchange.
//!
//! ChatService coordinates the SessionStore and the LlmProvider:
//! seeding sessions, running append -> window -> model -> append -> truncate,
//! and resetting conversations.

use tracing::{Instrument, debug, field, info, info_span, warn};

use lexchat_types::chat::SessionId;
use lexchat_types::error::ChatError;
use lexchat_types::llm::GenerationRequest;

use crate::llm::collect::collect_text;
use crate::llm::provider::LlmProvider;
use crate::session::store::SessionStore;

use super::log::ConversationLog;
use super::persona::{INITIAL_GREETING, PERSONA_INSTRUCTION, RESET_GREETING};
use super::window::{PromptWindow, build_prompt_window};

/// Model settings fixed at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Model identifier forwarded to the provider.
    pub model: String,
    /// Enable live web search augmentation.
    pub web_search: bool,
    /// Reasoning budget (`-1` = dynamic).
    pub thinking_budget: i32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro".to_string(),
            web_search: true,
            thinking_budget: -1,
        }
    }
}

/// Orchestrates conversation state and model calls for browser sessions.
///
/// Generic over `SessionStore` and `LlmProvider` so lexchat-core never
/// depends on lexchat-infra.
///
/// Two concurrent exchanges on the same session id race: each loads the log,
/// and whichever stores last wins.
pub struct ChatService<S: SessionStore, P: LlmProvider> {
    store: S,
    provider: P,
    settings: ChatSettings,
}

impl<S: SessionStore, P: LlmProvider> ChatService<S, P> {
    /// Create a new chat service.
    pub fn new(store: S, provider: P, settings: ChatSettings) -> Self {
        Self {
            store,
            provider,
            settings,
        }
    }

    // --- Session lifecycle ---

    /// Ensure the session has a log, seeding it with the greeting if needed.
    ///
    /// Idempotent: an existing log is returned unchanged.
    pub async fn initialize_session(&self, id: &SessionId) -> Result<ConversationLog, ChatError> {
        if let Some(log) = self.store.get(id).await? {
            return Ok(log);
        }

        let log = ConversationLog::seeded(INITIAL_GREETING);
        self.store.put(id, &log).await?;
        info!(session_id = %id, "Session initialized");
        Ok(log)
    }

    /// Current log for a session, empty if the session has none.
    pub async fn history(&self, id: &SessionId) -> Result<ConversationLog, ChatError> {
        Ok(self.store.get(id).await?.unwrap_or_default())
    }

    /// Replace the session's log with a fresh greeting, discarding all turns.
    pub async fn reset(&self, id: &SessionId) -> Result<ConversationLog, ChatError> {
        let log = ConversationLog::seeded(RESET_GREETING);
        self.store.put(id, &log).await?;
        info!(session_id = %id, "Session reset");
        Ok(log)
    }

    // --- Message exchange ---

    /// Run one full exchange and return Lex's reply.
    ///
    /// The user turn is stored before the model is called. If the call
    /// fails, the log keeps that user turn with no reply and the error is
    /// returned; the reply is only recorded once fully received.
    ///
    /// The log is truncated to [`MAX_RETAINED`] only after a reply is
    /// appended. A run of failed calls therefore leaves the stored log one
    /// turn longer per failure, and the next successful exchange trims it
    /// back.
    ///
    /// [`MAX_RETAINED`]: crate::chat::log::MAX_RETAINED
    pub async fn send_message(&self, id: &SessionId, message: &str) -> Result<String, ChatError> {
        let mut log = self.store.get(id).await?.unwrap_or_default();
        log.append_user_turn(message);
        self.store.put(id, &log).await?;

        debug!(
            session_id = %id,
            message_chars = log.last().map(|t| t.text.chars().count()).unwrap_or(0),
            log_len = log.len(),
            "User turn recorded"
        );

        let window = build_prompt_window(&log);
        let reply = match self.invoke_model(window).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session_id = %id, error = %e, "Model call failed; user turn kept without reply");
                return Err(e);
            }
        };

        log.append_assistant_turn(reply.clone()).truncate();
        self.store.put(id, &log).await?;

        debug!(session_id = %id, log_len = log.len(), "Assistant turn recorded");
        Ok(reply)
    }

    /// Send a prompt window to the model and return the joined reply text.
    pub async fn invoke_model(&self, window: PromptWindow) -> Result<String, ChatError> {
        let request = GenerationRequest {
            model: self.settings.model.clone(),
            contents: window.into_turns(),
            system_instruction: PERSONA_INSTRUCTION.to_string(),
            web_search: self.settings.web_search,
            thinking_budget: self.settings.thinking_budget,
        };

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.turns = request.contents.len(),
            gen_ai.request.web_search = request.web_search,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
        );

        let reply = collect_text(self.provider.stream(request))
            .instrument(span.clone())
            .await?;

        if let Some(usage) = &reply.usage {
            span.record("gen_ai.usage.input_tokens", usage.input_tokens);
            span.record("gen_ai.usage.output_tokens", usage.output_tokens);
        }

        Ok(reply.text)
    }
}
