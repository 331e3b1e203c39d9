//! PING handler.

use crate::handlers::{CommandLine, Context, Handler, HandlerResult};
use async_trait::async_trait;
use chatroom_proto::Reply;

/// Handler for `/ping`.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _cmd: &CommandLine<'_>) -> HandlerResult {
        ctx.reply(Reply::Pong).await
    }
}
