//! Prompt window assembly.
//!
//! Every request rebuilds the context sent upstream from the stored log:
//!
//! ```text
//! [persona (user), seed greeting (assistant)]
//!   ++ up to WINDOW_SIZE turns preceding the current one
//!   ++ [current user turn]
//! ```
//!
//! The stored log's own first greeting is not special-cased: once it falls
//! inside the history slice it appears after the fixed seed greeting.

use lexchat_types::chat::Turn;

use super::log::ConversationLog;
use super::persona::{INITIAL_GREETING, PERSONA_INSTRUCTION};

/// Number of prior turns carried into each prompt.
pub const WINDOW_SIZE: usize = 10;

/// Number of fixed turns that open every window.
pub const PREAMBLE_LEN: usize = 2;

/// Bounded prompt context for one model call. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptWindow {
    turns: Vec<Turn>,
    history_len: usize,
}

impl PromptWindow {
    /// All turns in send order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The persona and seed greeting.
    pub fn preamble(&self) -> &[Turn] {
        &self.turns[..PREAMBLE_LEN]
    }

    /// Prior turns carried from the log.
    pub fn history(&self) -> &[Turn] {
        &self.turns[PREAMBLE_LEN..PREAMBLE_LEN + self.history_len]
    }

    /// The turn being answered, if the log was non-empty.
    pub fn current(&self) -> Option<&Turn> {
        self.turns.get(PREAMBLE_LEN + self.history_len)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }
}

/// Build the prompt window for a log whose last element is the just-appended
/// user turn.
///
/// Short logs degrade to whatever history is available; an empty log yields
/// only the preamble.
pub fn build_prompt_window(log: &ConversationLog) -> PromptWindow {
    let turns = log.turns();

    let mut window = Vec::with_capacity(PREAMBLE_LEN + WINDOW_SIZE + 1);
    window.push(Turn::user(PERSONA_INSTRUCTION));
    window.push(Turn::assistant(INITIAL_GREETING));

    let Some((current, earlier)) = turns.split_last() else {
        return PromptWindow {
            turns: window,
            history_len: 0,
        };
    };

    let start = earlier.len().saturating_sub(WINDOW_SIZE);
    let history = &earlier[start..];
    window.extend_from_slice(history);
    window.push(current.clone());

    PromptWindow {
        turns: window,
        history_len: history.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexchat_types::chat::TurnRole;

    fn log_of_len(len: usize) -> ConversationLog {
        let mut log = ConversationLog::seeded(INITIAL_GREETING);
        for i in 1..len {
            if i % 2 == 1 {
                log.append_user_turn(&format!("u{i}"));
            } else {
                log.append_assistant_turn(format!("a{i}"));
            }
        }
        log
    }

    #[test]
    fn test_history_length_property() {
        for len in 0..30 {
            let log = if len == 0 {
                ConversationLog::new()
            } else {
                log_of_len(len)
            };
            let window = build_prompt_window(&log);
            let expected_history = WINDOW_SIZE.min(len.saturating_sub(1));
            assert_eq!(window.history().len(), expected_history, "log len {len}");
            let expected_total = PREAMBLE_LEN + expected_history + usize::from(len > 0);
            assert_eq!(window.len(), expected_total, "log len {len}");
        }
    }

    #[test]
    fn test_preamble_is_persona_then_greeting() {
        let window = build_prompt_window(&log_of_len(2));
        let preamble = window.preamble();
        assert_eq!(preamble[0].role, TurnRole::User);
        assert_eq!(preamble[0].text, PERSONA_INSTRUCTION);
        assert_eq!(preamble[1].role, TurnRole::Assistant);
        assert_eq!(preamble[1].text, INITIAL_GREETING);
    }

    #[test]
    fn test_first_exchange_window() {
        let mut log = ConversationLog::seeded(INITIAL_GREETING);
        log.append_user_turn("my tooth hurts");

        let window = build_prompt_window(&log);
        assert_eq!(window.len(), 4);
        assert_eq!(window.history(), &[Turn::assistant(INITIAL_GREETING)]);
        assert_eq!(window.current(), Some(&Turn::user("my tooth hurts")));
    }

    #[test]
    fn test_long_log_takes_ten_turns_before_current() {
        let log = log_of_len(25);
        let window = build_prompt_window(&log);
        let turns = log.turns();

        assert_eq!(window.history(), &turns[14..24]);
        assert_eq!(window.current(), turns.last());
    }

    #[test]
    fn test_roles_are_preserved() {
        let log = log_of_len(7);
        let window = build_prompt_window(&log);
        for (w, l) in window.history().iter().zip(&log.turns()[..6]) {
            assert_eq!(w.role, l.role);
            assert_eq!(w.text, l.text);
        }
    }

    #[test]
    fn test_empty_log_yields_preamble_only() {
        let window = build_prompt_window(&ConversationLog::new());
        assert_eq!(window.len(), PREAMBLE_LEN);
        assert!(window.history().is_empty());
        assert!(window.current().is_none());
    }

    #[test]
    fn test_deterministic() {
        let log = log_of_len(13);
        assert_eq!(build_prompt_window(&log), build_prompt_window(&log));
    }
}
