//! Observability setup for the Lex chat service.

pub mod tracing_setup;
