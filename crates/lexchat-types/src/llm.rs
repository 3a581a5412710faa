//! Model Client request/response types.
//!
//! These model the data shapes exchanged with the hosted text-generation
//! service: the generation request, the lazily streamed fragments, usage
//! metadata and provider errors.

use serde::{Deserialize, Serialize};

use crate::chat::Turn;

/// Request sent to a Model Client for one reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier (e.g. "gemini-2.5-pro").
    pub model: String,
    /// Ordered role-tagged turns (the prompt window).
    pub contents: Vec<Turn>,
    /// Static persona / behavioral instruction.
    pub system_instruction: String,
    /// Whether live web search augmentation is enabled.
    #[serde(default)]
    pub web_search: bool,
    /// Reasoning token budget; `-1` lets the model decide.
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: i32,
}

fn default_thinking_budget() -> i32 {
    -1
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_tokens: Option<u32>,
}

/// Events emitted while a reply is streamed from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// A fragment of reply text.
    TextDelta { text: String },

    /// Token usage information (the latest event supersedes earlier ones).
    Usage(Usage),

    /// The stream has completed.
    Done,
}

/// Errors from Model Client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
