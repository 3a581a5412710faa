//! BoxLlmProvider -- dynamic dispatch wrapper for LlmProvider.
//!
//! Lets the application pin `ChatService` to a single provider type while
//! still choosing the concrete backend at runtime (the Gemini client in
//! production, a scripted double in tests).

use lexchat_types::llm::GenerationRequest;

use super::provider::{EventStream, LlmProvider};

/// Type-erased LLM provider.
pub struct BoxLlmProvider {
    inner: Box<dyn LlmProvider>,
}

impl BoxLlmProvider {
    /// Wrap a concrete `LlmProvider` in a type-erased box.
    pub fn new<T: LlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl LlmProvider for BoxLlmProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn stream(&self, request: GenerationRequest) -> EventStream {
        self.inner.stream(request)
    }
}
