//! SSE stream adapter for Gemini `streamGenerateContent?alt=sse`.
//!
//! Each `data:` line carries a complete JSON `GenerateContentResponse`
//! chunk. Text parts become [`StreamEvent::TextDelta`]s, `usageMetadata`
//! becomes [`StreamEvent::Usage`] (Gemini repeats cumulative usage, so the
//! last one wins), and the end of the body yields [`StreamEvent::Done`].
//!
//! Thought-summary parts (`"thought": true`) are never surfaced.

use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};

use lexchat_core::llm::provider::EventStream;
use lexchat_types::llm::{LlmError, StreamEvent, Usage};

use super::types::{GeminiChunk, GeminiErrorBody, GeminiErrorEnvelope, GeminiRequest};

/// Map a non-success HTTP status and its body to an [`LlmError`].
///
/// Google's JSON error envelope is preferred for the message; otherwise the
/// raw body is used.
pub fn map_http_error(status: u16, body: &str) -> LlmError {
    classify(status, error_detail(status, body))
}

fn classify(status: u16, detail: String) -> LlmError {
    match status {
        401 | 403 => LlmError::AuthenticationFailed(detail),
        429 => LlmError::RateLimited(detail),
        400 | 404 => LlmError::InvalidRequest(detail),
        503 => LlmError::Overloaded(detail),
        _ => LlmError::Provider { message: detail },
    }
}

fn error_detail(status: u16, body: &str) -> String {
    // Streaming endpoints sometimes wrap the envelope in an array. serde
    // also accepts a sequence for a struct, so the shape is checked first.
    let envelope = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .next()
            .and_then(|first| serde_json::from_value::<GeminiErrorEnvelope>(first).ok()),
        Ok(value @ serde_json::Value::Object(_)) => {
            serde_json::from_value::<GeminiErrorEnvelope>(value).ok()
        }
        _ => None,
    };
    if let Some(envelope) = envelope {
        return envelope.error.describe();
    }
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {body}")
    }
}

fn map_inline_error(error: &GeminiErrorBody) -> LlmError {
    classify(error.code.unwrap_or(500), error.describe())
}

/// Convert one SSE `data:` payload into zero or more stream events.
pub fn chunk_to_events(data: &str) -> Result<Vec<StreamEvent>, LlmError> {
    let chunk: GeminiChunk = serde_json::from_str(data)
        .map_err(|e| LlmError::Deserialization(format!("gemini chunk: {e}")))?;

    if let Some(error) = &chunk.error {
        return Err(map_inline_error(error));
    }

    let mut events = Vec::new();
    if let Some(text) = chunk.text() {
        events.push(StreamEvent::TextDelta { text });
    }
    if let Some(usage) = &chunk.usage_metadata {
        events.push(StreamEvent::Usage(Usage {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            thinking_tokens: usage.thoughts_token_count,
        }));
    }
    Ok(events)
}

/// Open a streaming connection to Gemini.
///
/// The request is not sent until the returned stream is first polled.
pub fn create_gemini_stream(
    client: &reqwest::Client,
    url: &str,
    body: GeminiRequest,
    api_key: &SecretString,
) -> EventStream {
    let client = client.clone();
    let url = url.to_string();
    let api_key = api_key.expose_secret().to_string();

    Box::pin(async_stream::try_stream! {
        let response = client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        let response = if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Gemini API error response");
            Err(map_http_error(status.as_u16(), &error_body))?;
            unreachable!()
        } else {
            response
        };

        let mut events = response.bytes_stream().eventsource();
        while let Some(event) = events.next().await {
            let event = event.map_err(|e| LlmError::Stream(e.to_string()))?;
            if event.data.trim().is_empty() {
                continue;
            }
            for ev in chunk_to_events(&event.data)? {
                yield ev;
            }
        }

        yield StreamEvent::Done;
    })
}
