//! Delivery primitives built on [`Registry::for_each`].
//!
//! A failed delivery to one recipient is logged and counted, then the
//! iteration moves on. The failing session is not torn down here; its own
//! connection task notices the dead peer on its next read.

use chatroom_proto::Reply;
use std::sync::Arc;
use tracing::warn;

use super::{Registry, Session, Uid};
use crate::metrics;

impl Registry {
    /// Deliver `reply` to every live session. Returns recipients reached.
    pub fn send_to_all(&self, reply: Reply) -> usize {
        self.fanout(reply, |_| true)
    }

    /// Deliver `reply` to every live session except `exclude`.
    pub fn send_to_others(&self, reply: Reply, exclude: Uid) -> usize {
        self.fanout(reply, |session| session.uid() != exclude)
    }

    /// Deliver `reply` to the session with `target`, if live.
    ///
    /// An unknown uid is a silent no-op; returns whether a copy was queued.
    pub fn send_to_uid(&self, reply: Reply, target: Uid) -> bool {
        let reply = Arc::new(reply);
        self.with_session(target, |session| deliver_one(session, &reply))
            .unwrap_or(false)
    }

    fn fanout<F>(&self, reply: Reply, mut include: F) -> usize
    where
        F: FnMut(&Session) -> bool,
    {
        let reply = Arc::new(reply);
        let mut delivered = 0;
        self.for_each(|session| {
            if include(session.as_ref()) && deliver_one(session, &reply) {
                delivered += 1;
            }
        });
        metrics::record_fanout(delivered);
        delivered
    }
}

fn deliver_one(session: &Session, reply: &Arc<Reply>) -> bool {
    match session.deliver(Arc::clone(reply)) {
        Ok(()) => {
            metrics::record_delivery("delivered");
            true
        }
        Err(e) => {
            warn!(uid = session.uid(), kind = reply.kind(), error = %e, "Delivery failed");
            metrics::record_delivery(e.error_code());
            false
        }
    }
}
