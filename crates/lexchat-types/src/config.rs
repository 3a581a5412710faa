//! Service configuration for Lex.
//!
//! `LexConfig` mirrors `lexchat.toml`. Every field has a default so an empty
//! (or missing) file yields a runnable configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the chat service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexConfig {
    /// Interface the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Gemini model identifier.
    pub model: String,
    /// Base URL of the Generative Language API.
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Key used to sign session cookies. Generated at start when absent.
    pub secret_key: Option<String>,
    /// Enable Google Search grounding on every request.
    pub web_search: bool,
    /// Reasoning budget forwarded to the model (`-1` = dynamic).
    pub thinking_budget: i32,
    /// Overall timeout for one upstream call, in seconds.
    pub request_timeout_secs: u64,
    /// Idle lifetime of a session, in seconds. `0` disables expiry.
    pub session_ttl_secs: u64,
    /// Name of the session cookie.
    pub cookie_name: String,
}

impl Default for LexConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            model: "gemini-2.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            secret_key: None,
            web_search: true,
            thinking_budget: -1,
            request_timeout_secs: 300,
            session_ttl_secs: 31 * 24 * 60 * 60,
            cookie_name: "lex_session".to_string(),
        }
    }
}
