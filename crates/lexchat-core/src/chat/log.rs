//! Rolling conversation log for one session.
//!
//! Turns are append-only; the only way a turn leaves the log is eviction of
//! the oldest entries by [`ConversationLog::truncate`] or a full reset.

use serde::{Deserialize, Serialize};

use lexchat_types::chat::Turn;

/// Maximum number of turns retained after an exchange completes.
pub const MAX_RETAINED: usize = 50;

/// Ordered turns of one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log holding a single assistant greeting.
    pub fn seeded(greeting: &str) -> Self {
        Self {
            turns: vec![Turn::assistant(greeting)],
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Append the patient's message, trimmed of surrounding whitespace.
    ///
    /// Empty or whitespace-only messages are stored as an empty turn.
    pub fn append_user_turn(&mut self, text: &str) -> &mut Self {
        self.turns.push(Turn::user(text.trim()));
        self
    }

    /// Append Lex's reply verbatim.
    pub fn append_assistant_turn(&mut self, text: impl Into<String>) -> &mut Self {
        self.turns.push(Turn::assistant(text));
        self
    }

    /// Drop the oldest turns so at most [`MAX_RETAINED`] remain.
    pub fn truncate(&mut self) -> &mut Self {
        if self.turns.len() > MAX_RETAINED {
            let excess = self.turns.len() - MAX_RETAINED;
            self.turns.drain(..excess);
        }
        self
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }
}
