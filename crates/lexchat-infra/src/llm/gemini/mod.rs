//! Google Gemini provider implementation.
//!
//! This module provides the [`GeminiProvider`] which implements the
//! [`LlmProvider`](lexchat_core::llm::provider::LlmProvider) trait for the
//! Generative Language API `streamGenerateContent` endpoint over SSE.

pub mod client;
pub mod streaming;
pub mod types;

pub use client::GeminiProvider;
