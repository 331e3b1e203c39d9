//! Plain chat lines.

use crate::state::{Matrix, Session};
use chatroom_proto::Reply;

/// Relay a chat line from `session` to every other live session.
///
/// The sender does not receive its own line. Returns recipients reached.
pub fn broadcast_chat(session: &Session, matrix: &Matrix, text: &str) -> usize {
    let reply = Reply::Chat {
        name: session.name(),
        text: text.to_string(),
    };
    matrix.registry.send_to_others(reply, session.uid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::core::testing::Room;

    #[test]
    fn chat_reaches_everyone_but_sender() {
        let mut room = Room::with_uids(&[10, 11, 12]);
        room.session(0).rename("alice");

        let reached = broadcast_chat(room.session(0), &room.matrix, "hi all");
        assert_eq!(reached, 2);

        let expected = Reply::Chat {
            name: "alice".into(),
            text: "hi all".into(),
        };
        assert!(room.drain(0).is_empty());
        assert_eq!(room.drain(1), vec![expected.clone()]);
        assert_eq!(room.drain(2), vec![expected]);
    }

    #[test]
    fn chat_alone_reaches_nobody() {
        let mut room = Room::with_uids(&[10]);
        assert_eq!(broadcast_chat(room.session(0), &room.matrix, "echo?"), 0);
        assert!(room.drain(0).is_empty());
    }
}
