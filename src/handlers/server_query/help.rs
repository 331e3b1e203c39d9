//! HELP handler.

use crate::handlers::{CommandLine, Context, Handler, HandlerResult};
use async_trait::async_trait;
use chatroom_proto::Reply;

/// Handler for `/help`.
pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _cmd: &CommandLine<'_>) -> HandlerResult {
        ctx.reply(Reply::Help).await
    }
}
