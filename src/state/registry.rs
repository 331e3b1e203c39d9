//! The bounded set of live sessions.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::{Session, Uid};

/// Bounded registry of live sessions, keyed by uid.
///
/// Every operation holds the lock for the whole scan-and-mutate or
/// scan-and-read, so readers never see a half-applied insert or removal.
/// No network I/O happens under the lock; visitors only queue onto mailboxes.
pub struct Registry {
    sessions: RwLock<HashMap<Uid, Arc<Session>>>,
    capacity: usize,
}

impl Registry {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::with_capacity(capacity)),
            capacity,
        }
    }

    /// Admit `session` if a slot is free and its uid is not already live.
    ///
    /// Returns `false` on admission failure; the caller must then close the
    /// connection without announcing it.
    pub fn add(&self, session: Arc<Session>) -> bool {
        let mut sessions = self.sessions.write();
        if sessions.len() >= self.capacity || sessions.contains_key(&session.uid()) {
            return false;
        }
        sessions.insert(session.uid(), session);
        true
    }

    /// Remove the session with `uid`. Absent uids are a no-op.
    pub fn remove(&self, uid: Uid) -> Option<Arc<Session>> {
        self.sessions.write().remove(&uid)
    }

    /// Visit every live session under the read lock.
    ///
    /// A session whose removal has started is never visited, and a session is
    /// only visible once fully constructed.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Arc<Session>),
    {
        for session in self.sessions.read().values() {
            visit(session);
        }
    }

    /// Run `f` on the session with `uid`, if it is live.
    pub fn with_session<R>(&self, uid: Uid, f: impl FnOnce(&Arc<Session>) -> R) -> Option<R> {
        self.sessions.read().get(&uid).map(f)
    }

    /// Number of live sessions.
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether an `add` right now would be refused for lack of space.
    pub fn is_full(&self) -> bool {
        self.count() >= self.capacity
    }

    /// `(uid, name)` for every live session, ordered by uid.
    pub fn roster(&self) -> Vec<(Uid, String)> {
        let mut entries = Vec::new();
        self.for_each(|session| entries.push((session.uid(), session.name())));
        entries.sort_unstable_by_key(|(uid, _)| *uid);
        entries
    }
}
