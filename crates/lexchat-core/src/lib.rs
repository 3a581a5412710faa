//! Conversation session manager and port traits for the Lex chat service.
//!
//! This crate defines the "ports" (`SessionStore`, `LlmProvider`) that the
//! infrastructure layer implements. It depends only on `lexchat-types` --
//! never on `lexchat-infra`, HTTP, or the environment.

pub mod chat;
pub mod llm;
pub mod session;
