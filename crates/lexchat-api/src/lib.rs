//! HTTP layer and application state for the Lex chat service.
//!
//! The `lexchat` binary wires these together with the CLI; integration tests
//! drive the router directly.

pub mod http;
pub mod state;
