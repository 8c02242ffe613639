use super::sessions_model::SessionInfo;

/// Shared key-value map of session records, keyed by session id.
///
/// Implementations may be backed by a cluster-wide store; every method must
/// be safe to call from concurrent request handlers.
pub trait SessionStore: Send + Sync {
    /// Name of the map, e.g. `userSessions`.
    fn name(&self) -> &str;

    fn get(&self, session_id: &str) -> Option<SessionInfo>;

    /// Inserts or overwrites a record, returning the previous one.
    fn insert(&self, info: SessionInfo) -> Option<SessionInfo>;

    /// Replaces the record only if it still equals `expected`.
    fn replace(&self, expected: &SessionInfo, new: SessionInfo) -> bool;

    fn remove(&self, session_id: &str) -> Option<SessionInfo>;

    /// Removes the record only if it still equals `expected`.
    fn remove_if_unchanged(&self, expected: &SessionInfo) -> bool;

    fn snapshot(&self) -> Vec<SessionInfo>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
