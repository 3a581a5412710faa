//! Conversation Session Manager.
//!
//! Owns the rolling conversation log of one browser session, assembles the
//! bounded prompt window sent upstream, and orchestrates one exchange.

pub mod log;
pub mod persona;
pub mod service;
pub mod window;
