//! HTTP layer for Lex.
//!
//! Serves the chat page plus a small JSON API used by the page's script.
//! Sessions are identified by a signed cookie.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod templates;
