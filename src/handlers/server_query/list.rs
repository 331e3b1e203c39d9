//! LIST handler.

use crate::handlers::{CommandLine, Context, Handler, HandlerResult};
use async_trait::async_trait;
use chatroom_proto::Reply;

/// Handler for `/list`: a snapshot of live sessions in uid order.
pub struct ListHandler;

#[async_trait]
impl Handler for ListHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _cmd: &CommandLine<'_>) -> HandlerResult {
        let entries = ctx.matrix.registry.roster();
        ctx.reply(Reply::ClientList { entries }).await
    }
}
