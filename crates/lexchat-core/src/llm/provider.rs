//! LlmProvider trait definition.
//!
//! The Model Client is an opaque remote call: it accepts a
//! [`GenerationRequest`] and produces a lazy sequence of [`StreamEvent`]s.

use std::pin::Pin;

use futures_util::Stream;

use lexchat_types::llm::{GenerationRequest, LlmError, StreamEvent};

/// Boxed event stream returned by providers.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for text-generation backends (Gemini, test doubles).
///
/// `stream` returns a boxed `'static` stream so the provider can be used
/// behind dynamic dispatch and the stream can outlive the borrow of `self`.
///
/// Implementations live in lexchat-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a generation request. Returns a stream of events.
    fn stream(&self, request: GenerationRequest) -> EventStream;
}
