//! Application state wiring the chat service, cookie signer and templates.
//!
//! `ChatService` is generic over its store and provider; AppState pins it to
//! the in-memory store and a boxed provider so tests can swap the model.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use minijinja::Environment;

use lexchat_core::chat::service::{ChatService, ChatSettings};
use lexchat_core::llm::box_provider::BoxLlmProvider;
use lexchat_infra::config::{resolve_api_key, resolve_secret_key};
use lexchat_infra::crypto::SessionSigner;
use lexchat_infra::llm::gemini::GeminiProvider;
use lexchat_infra::session::InMemorySessionStore;
use lexchat_types::config::LexConfig;

use crate::http::templates::page_templates;

/// Concrete chat service used by the server.
pub type ConcreteChatService = ChatService<InMemorySessionStore, BoxLlmProvider>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub signer: Arc<SessionSigner>,
    pub cookie_name: Arc<str>,
    pub templates: Arc<Environment<'static>>,
}

impl AppState {
    /// Build production state: Gemini provider, generated or configured
    /// signing key.
    ///
    /// Fails when the API key variable is unset.
    pub fn init(config: &LexConfig) -> anyhow::Result<Self> {
        let api_key = resolve_api_key(config).with_context(|| {
            format!(
                "{} is not set; export your Gemini API key to start the server",
                config.api_key_env
            )
        })?;

        let provider = GeminiProvider::new(
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )?
        .with_base_url(config.base_url.clone());

        let secret_key = resolve_secret_key(config);
        Self::with_provider(config, BoxLlmProvider::new(provider), secret_key.as_bytes())
    }

    /// Build state around an arbitrary provider.
    pub fn with_provider(
        config: &LexConfig,
        provider: BoxLlmProvider,
        secret_key: &[u8],
    ) -> anyhow::Result<Self> {
        let settings = ChatSettings {
            model: config.model.clone(),
            web_search: config.web_search,
            thinking_budget: config.thinking_budget,
        };
        let store = InMemorySessionStore::with_ttl_secs(config.session_ttl_secs);
        let signer = SessionSigner::new(secret_key)?;
        let templates = page_templates().context("failed to load page templates")?;

        Ok(Self {
            chat_service: Arc::new(ChatService::new(store, provider, settings)),
            signer: Arc::new(signer),
            cookie_name: Arc::from(config.cookie_name.as_str()),
            templates: Arc::new(templates),
        })
    }
}
