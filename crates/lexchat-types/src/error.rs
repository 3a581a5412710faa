use thiserror::Error;

use crate::llm::LlmError;

/// Errors from session store operations (used by the trait in lexchat-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the conversation session manager.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The Model Client call failed. Carries the underlying message verbatim.
    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<LlmError> for ChatError {
    fn from(e: LlmError) -> Self {
        ChatError::Upstream(e.to_string())
    }
}
