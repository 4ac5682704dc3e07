use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use audit_trail_api::{AuditError, AuditResult};

use crate::session::{EntityToken, SessionId};

/// Session-scoped stack of change descriptions.
///
/// Callers describe an entity's pending change in application terms before
/// the flush; the engine pops the whole map for the session when it builds
/// the change groups. Comments are keyed by the instance's session token, not
/// its primary key, because the key may not exist yet at description time.
///
/// Only the outer map is guarded: the persistence engine guarantees
/// single-threaded access to one session at a time, so per-session maps never
/// race with themselves.
#[derive(Debug, Default)]
pub struct CommentStore {
    inner: Mutex<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    sessions: HashSet<SessionId>,
    comments: HashMap<SessionId, HashMap<EntityToken, String>>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a session known to the store; called when the session opens
    pub fn register_session(&self, session: SessionId) {
        self.inner.lock().sessions.insert(session);
    }

    /// Records `comment` for the entity, to be attached to its next change
    /// group. Empty comments are a no-op. Last write per entity wins.
    pub fn describe(
        &self,
        session: SessionId,
        entity: EntityToken,
        comment: &str,
    ) -> AuditResult<()> {
        if comment.is_empty() {
            return Ok(());
        }

        let mut state = self.inner.lock();
        if !state.sessions.contains(&session) {
            return Err(AuditError::NoSessionFound(format!(
                "No known session {session:?} for described entity {entity:?}"
            )));
        }

        state
            .comments
            .entry(session)
            .or_default()
            .insert(entity, comment.to_string());
        tracing::trace!(?session, ?entity, "recorded change description");

        Ok(())
    }

    /// Atomically returns and clears all recorded comments for the session
    pub fn pop(&self, session: SessionId) -> HashMap<EntityToken, String> {
        self.inner
            .lock()
            .comments
            .remove(&session)
            .unwrap_or_default()
    }

    /// Drops residual comments once the session flushed; descriptions must
    /// not leak into the next commit cycle
    pub fn on_session_flushed(&self, session: SessionId) {
        self.inner
            .lock()
            .comments
            .remove(&session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenArena;

    #[test]
    fn describe_and_pop_round_trip() {
        let store = CommentStore::new();
        let session = SessionId::new();
        let mut arena = TokenArena::new();
        let order = arena.issue();

        store.register_session(session);
        store
            .describe(session, order, "Total items change test")
            .unwrap();

        let comments = store.pop(session);
        assert_eq!(
            comments.get(&order).map(String::as_str),
            Some("Total items change test")
        );

        // A pop clears the session's stack
        assert!(store.pop(session).is_empty());
    }

    #[test]
    fn empty_comment_is_a_no_op() {
        let store = CommentStore::new();
        let session = SessionId::new();
        store.register_session(session);

        store.describe(session, TokenArena::new().issue(), "").unwrap();
        assert!(store.pop(session).is_empty());
    }

    #[test]
    fn unknown_session_is_an_error() {
        let store = CommentStore::new();
        let err = store
            .describe(SessionId::new(), TokenArena::new().issue(), "orphan")
            .unwrap_err();
        assert!(matches!(err, AuditError::NoSessionFound(_)));
    }

    #[test]
    fn sessions_are_isolated_from_each_other() {
        let store = CommentStore::new();
        let first = SessionId::new();
        let second = SessionId::new();
        let mut arena = TokenArena::new();
        let entity = arena.issue();

        store.register_session(first);
        store.register_session(second);
        store.describe(first, entity, "first session only").unwrap();

        assert!(store.pop(second).is_empty());
        assert_eq!(store.pop(first).len(), 1);
    }

    #[test]
    fn flush_cleanup_drops_residual_comments() {
        let store = CommentStore::new();
        let session = SessionId::new();
        store.register_session(session);
        store
            .describe(session, TokenArena::new().issue(), "left over")
            .unwrap();

        store.on_session_flushed(session);
        assert!(store.pop(session).is_empty());
    }

    #[test]
    fn last_description_per_entity_wins() {
        let store = CommentStore::new();
        let session = SessionId::new();
        let mut arena = TokenArena::new();
        let entity = arena.issue();

        store.register_session(session);
        store.describe(session, entity, "first").unwrap();
        store.describe(session, entity, "second").unwrap();

        let comments = store.pop(session);
        assert_eq!(comments.get(&entity).map(String::as_str), Some("second"));
    }
}
