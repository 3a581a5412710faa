//! Infrastructure layer for the Lex chat service.
//!
//! Implements the ports defined in `lexchat-core`: the Gemini streaming
//! client and the in-memory session store. Also owns configuration loading
//! and session-cookie signing.

pub mod config;
pub mod crypto;
pub mod llm;
pub mod session;
