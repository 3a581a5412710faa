//! SessionStore trait definition.
//!
//! Follows the RPITIT repository pattern: native async fn in traits
//! (Rust 2024 edition), implementations live in lexchat-infra.

use lexchat_types::chat::SessionId;
use lexchat_types::error::StoreError;

use crate::chat::log::ConversationLog;

/// Storage for per-session conversation logs.
///
/// `put` replaces whatever was stored for the id (last write wins).
pub trait SessionStore: Send + Sync {
    /// Fetch the log for a session. `None` when the session has no log yet
    /// or the store has expired it.
    fn get(
        &self,
        id: &SessionId,
    ) -> impl std::future::Future<Output = Result<Option<ConversationLog>, StoreError>> + Send;

    /// Store (or replace) the log for a session.
    fn put(
        &self,
        id: &SessionId,
        log: &ConversationLog,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Drop a session and its log.
    fn remove(
        &self,
        id: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
