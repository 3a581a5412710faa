//! Eager consumption of a provider event stream.
//!
//! The browser never sees partial replies: the whole stream is drained and
//! joined before anything is returned. An error anywhere in the stream
//! discards the fragments gathered so far.

use futures_util::StreamExt;

use lexchat_types::llm::{LlmError, StreamEvent, Usage};

use super::provider::EventStream;

/// A fully received reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedReply {
    /// Concatenation of every text fragment, in arrival order.
    pub text: String,
    /// Last usage report seen on the stream, if any.
    pub usage: Option<Usage>,
}

/// Drain `stream`, concatenating text fragments.
///
/// Stops at `Done` or at the end of the stream, whichever comes first.
pub async fn collect_text(mut stream: EventStream) -> Result<CollectedReply, LlmError> {
    let mut reply = CollectedReply::default();

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::TextDelta { text } => reply.text.push_str(&text),
            StreamEvent::Usage(usage) => reply.usage = Some(usage),
            StreamEvent::Done => break,
        }
    }

    Ok(reply)
}
