//! Model Client abstractions.
//!
//! - `LlmProvider`: trait for concrete text-generation backends
//! - `BoxLlmProvider`: type-erased wrapper for runtime selection
//! - `collect_text`: eager concatenation of a fragment stream

pub mod box_provider;
pub mod collect;
pub mod provider;
