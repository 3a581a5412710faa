//! LLM provider implementations.
//!
//! Contains concrete implementations of the
//! [`LlmProvider`](lexchat_core::llm::provider::LlmProvider) trait.

pub mod gemini;
