//! Session storage abstraction.
//!
//! The `SessionStore` trait maps a browser session id to its conversation
//! log. Expiry policy belongs to the implementation.

pub mod store;
