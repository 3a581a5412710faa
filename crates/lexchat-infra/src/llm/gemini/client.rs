//! GeminiProvider -- concrete [`LlmProvider`] for Google's Gemini API.
//!
//! Every call goes to `streamGenerateContent?alt=sse`; callers that want
//! the whole reply use `lexchat_core::llm::collect::collect_text`.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the request header.

use std::time::Duration;

use secrecy::SecretString;

use lexchat_core::llm::provider::{EventStream, LlmProvider};
use lexchat_types::llm::{GenerationRequest, LlmError};

use super::streaming::create_gemini_stream;
use super::types::{
    GeminiContent, GeminiRequest, GeminiTool, GenerationConfig, GoogleSearch, ThinkingConfig,
};

/// Gemini text-generation provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Create a provider with the given per-request timeout.
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        )
    }

    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        let tools = if request.web_search {
            vec![GeminiTool {
                google_search: GoogleSearch::default(),
            }]
        } else {
            Vec::new()
        };

        GeminiRequest {
            contents: request.contents.iter().map(GeminiContent::from_turn).collect(),
            system_instruction: (!request.system_instruction.is_empty())
                .then(|| GeminiContent::instruction(&request.system_instruction)),
            tools,
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: request.thinking_budget,
                },
            },
        }
    }
}

// No Debug impl: the struct holds the API key.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn stream(&self, request: GenerationRequest) -> EventStream {
        let url = self.url(&request.model);
        let body = Self::to_gemini_request(&request);
        create_gemini_stream(&self.client, &url, body, &self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use lexchat_core::llm::collect::collect_text;
    use lexchat_types::chat::Turn;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn request(web_search: bool) -> GenerationRequest {
        GenerationRequest {
            model: "gemini-2.5-pro".to_string(),
            contents: vec![Turn::user("persona"), Turn::assistant("hi"), Turn::user("ouch")],
            system_instruction: "persona".to_string(),
            web_search,
            thinking_budget: -1,
        }
    }

    fn provider() -> GeminiProvider {
        GeminiProvider::new(
            SecretString::from("test-key".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_url_shape() {
        let p = provider().with_base_url("http://localhost:9999/v1beta/");
        assert_eq!(p.base_url(), "http://localhost:9999/v1beta");
        assert_eq!(
            p.url("gemini-2.5-pro"),
            "http://localhost:9999/v1beta/models/gemini-2.5-pro:streamGenerateContent?alt=sse"
        );
    }

    #[test]
    fn test_request_mapping() {
        let body = GeminiProvider::to_gemini_request(&request(true));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"].as_array().unwrap().len(), 3);
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][2]["parts"][0]["text"], "ouch");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "persona");
        assert!(json["tools"][0]["googleSearch"].is_object());

        let body = GeminiProvider::to_gemini_request(&request(false));
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("tools").is_none());
    }

    /// Serve exactly one HTTP response, returning the raw request text.
    async fn serve_once(response: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });
        (format!("http://{addr}/v1beta"), handle)
    }

    #[tokio::test]
    async fn test_stream_collects_reply() {
        let sse = concat!(
            "data: {\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"Rinse with \"}]}}]}\r\n\r\n",
            "data: {\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"warm salt water.\"}]},\"finishReason\":\"STOP\"}],",
            "\"usageMetadata\":{\"promptTokenCount\":40,\"candidatesTokenCount\":6}}\r\n\r\n",
        );
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n{sse}"
        );
        let (base_url, server) = serve_once(response).await;

        let p = provider().with_base_url(base_url);
        let reply = collect_text(p.stream(request(true))).await.unwrap();
        assert_eq!(reply.text, "Rinse with warm salt water.");
        assert_eq!(reply.usage.unwrap().input_tokens, 40);

        let raw = server.await.unwrap();
        assert!(raw.starts_with(
            "POST /v1beta/models/gemini-2.5-pro:streamGenerateContent?alt=sse HTTP/1.1"
        ));
        assert!(raw.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
        assert!(raw.contains("\"googleSearch\""));
    }

    #[tokio::test]
    async fn test_stream_maps_rate_limit() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        let response = format!(
            "HTTP/1.1 429 Too Many Requests\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (base_url, server) = serve_once(response).await;

        let p = provider().with_base_url(base_url);
        let err = collect_text(p.stream(request(false))).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "rate limited: 429 RESOURCE_EXHAUSTED. Resource has been exhausted"
        );
        server.await.unwrap();
    }
}
