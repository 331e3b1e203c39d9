//! A connected client as seen by the rest of the server.

use chatroom_proto::{NAME_MAX_LEN, Reply, truncate};
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::Uid;
use crate::error::DeliveryError;

/// Timeout for queueing a reply to the session's own mailbox.
/// A healthy client never comes close; hitting it means the peer stopped reading.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Receiving end of a session's mailbox, owned by its writer task.
pub type Mailbox = mpsc::Receiver<Arc<Reply>>;

/// One connected client.
///
/// The uid and peer address are fixed for the session's lifetime; the display
/// name changes through [`Session::rename`]. Outbound lines go through a
/// bounded mailbox drained by the connection's writer task, so any number of
/// other sessions can deliver to it concurrently.
#[derive(Debug)]
pub struct Session {
    uid: Uid,
    addr: SocketAddr,
    name: RwLock<String>,
    outbox: mpsc::Sender<Arc<Reply>>,
}

impl Session {
    /// Create a session and its mailbox. The default name is the uid.
    pub fn with_mailbox(uid: Uid, addr: SocketAddr, capacity: usize) -> (Arc<Self>, Mailbox) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let session = Self {
            uid,
            addr,
            name: RwLock::new(uid.to_string()),
            outbox: tx,
        };
        (Arc::new(session), rx)
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Current display name.
    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    /// Replace the display name, truncated to [`NAME_MAX_LEN`] bytes.
    ///
    /// Returns `(old, new)` as stored.
    pub fn rename(&self, name: &str) -> (String, String) {
        let new = truncate(name, NAME_MAX_LEN).to_string();
        let mut guard = self.name.write();
        let old = std::mem::replace(&mut *guard, new.clone());
        (old, new)
    }

    /// Queue a line without waiting. Used by broadcasts, which must never block.
    pub fn deliver(&self, reply: Arc<Reply>) -> Result<(), DeliveryError> {
        self.outbox.try_send(reply).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::MailboxFull(self.uid),
            TrySendError::Closed(_) => DeliveryError::Closed(self.uid),
        })
    }

    /// Queue a reply to this session, waiting for mailbox space.
    pub async fn send(&self, reply: Reply) -> Result<(), DeliveryError> {
        match tokio::time::timeout(SEND_TIMEOUT, self.outbox.send(Arc::new(reply))).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(DeliveryError::Closed(self.uid)),
            Err(_elapsed) => {
                tracing::warn!(
                    uid = self.uid,
                    "Mailbox overflow: client not reading (timeout after {:?})",
                    SEND_TIMEOUT
                );
                Err(DeliveryError::Timeout(self.uid))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    #[test]
    fn default_name_is_uid() {
        let (session, _rx) = Session::with_mailbox(10, addr(), 4);
        assert_eq!(session.uid(), 10);
        assert_eq!(session.name(), "10");
        assert_eq!(session.addr(), addr());
    }

    #[test]
    fn rename_keeps_uid_and_truncates() {
        let (session, _rx) = Session::with_mailbox(10, addr(), 4);
        let (old, new) = session.rename("alice");
        assert_eq!((old.as_str(), new.as_str()), ("10", "alice"));

        let long = "n".repeat(NAME_MAX_LEN + 10);
        let (_, new) = session.rename(&long);
        assert_eq!(new.len(), NAME_MAX_LEN);
        assert_eq!(session.name(), new);
        assert_eq!(session.uid(), 10);
    }

    #[test]
    fn deliver_reports_full_and_closed() {
        let (session, mut rx) = Session::with_mailbox(10, addr(), 1);
        assert!(session.deliver(Arc::new(Reply::Pong)).is_ok());
        assert_eq!(
            session.deliver(Arc::new(Reply::Pong)),
            Err(DeliveryError::MailboxFull(10))
        );

        assert_eq!(rx.try_recv().unwrap().as_ref(), &Reply::Pong);
        drop(rx);
        assert_eq!(
            session.deliver(Arc::new(Reply::Pong)),
            Err(DeliveryError::Closed(10))
        );
    }

    #[tokio::test]
    async fn send_queues_in_order() {
        let (session, mut rx) = Session::with_mailbox(10, addr(), 4);
        session.send(Reply::HelpHint).await.unwrap();
        session.send(Reply::Pong).await.unwrap();
        assert_eq!(rx.recv().await.unwrap().as_ref(), &Reply::HelpHint);
        assert_eq!(rx.recv().await.unwrap().as_ref(), &Reply::Pong);
    }

    #[tokio::test]
    async fn send_to_closed_mailbox_fails() {
        let (session, rx) = Session::with_mailbox(10, addr(), 4);
        drop(rx);
        assert_eq!(
            session.send(Reply::Pong).await,
            Err(DeliveryError::Closed(10))
        );
    }
}
