//! UID generation for sessions.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a session.
pub type Uid = u64;

/// Hands out monotonically increasing session uids.
///
/// Uids are never reused, even after the owning session disconnects.
pub struct UidGenerator {
    counter: AtomicU64,
}

impl UidGenerator {
    /// Create a generator whose first uid is `start`.
    pub fn new(start: Uid) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }

    /// Generate the next unique UID.
    pub fn next(&self) -> Uid {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}
