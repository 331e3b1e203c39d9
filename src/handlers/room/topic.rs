//! TOPIC handler.

use crate::handlers::{CommandLine, Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use chatroom_proto::Reply;
use tracing::info;

/// Handler for `/topic <text...>`.
///
/// Arguments are rejoined with single spaces; the new topic is announced to
/// every session.
pub struct TopicHandler;

#[async_trait]
impl Handler for TopicHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &CommandLine<'_>) -> HandlerResult {
        let text = cmd.rest(0).ok_or(HandlerError::NeedMessage)?;

        let topic = ctx.matrix.topic.set(&text);
        info!(uid = ctx.uid(), topic = %topic, "Topic changed");

        ctx.matrix.registry.send_to_all(Reply::Topic { topic });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::core::testing::{Room, command};

    #[tokio::test]
    async fn topic_is_stored_and_announced() {
        let mut room = Room::with_uids(&[10, 11]);
        let mut ctx = Context::new(room.session(0), &room.matrix);
        TopicHandler
            .handle(&mut ctx, &command("/topic   foo    bar "))
            .await
            .unwrap();

        assert_eq!(room.matrix.topic.get(), "foo bar");
        let expected = Reply::Topic {
            topic: "foo bar".into(),
        };
        assert_eq!(room.drain(0), vec![expected.clone()]);
        assert_eq!(room.drain(1), vec![expected]);
    }

    #[tokio::test]
    async fn missing_topic_is_usage_error() {
        let mut room = Room::with_uids(&[10, 11]);
        room.matrix.topic.set("keep me");
        let mut ctx = Context::new(room.session(0), &room.matrix);
        let result = TopicHandler.handle(&mut ctx, &command("/topic")).await;

        assert!(matches!(result, Err(HandlerError::NeedMessage)));
        assert_eq!(room.matrix.topic.get(), "keep me");
        assert!(room.drain(1).is_empty());
    }
}
