//! Shared domain types for the Lex chat service.
//!
//! Conversation turns, session identifiers, Model Client request/stream
//! shapes, configuration and the error enums used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
