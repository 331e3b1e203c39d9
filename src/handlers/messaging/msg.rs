//! Private messages addressed by uid.

use crate::handlers::{CommandLine, Context, Handler, HandlerError, HandlerResult};
use crate::state::Uid;
use async_trait::async_trait;
use chatroom_proto::Reply;
use tracing::debug;

/// Handler for `/msg <uid> <text...>`.
///
/// A reference that is not a number, or that names no live session, is
/// dropped without telling the sender.
pub struct MsgHandler;

#[async_trait]
impl Handler for MsgHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &CommandLine<'_>) -> HandlerResult {
        let reference = cmd.arg(0).ok_or(HandlerError::NeedReference)?;
        let text = cmd.rest(1).ok_or(HandlerError::NeedMessage)?;

        let Ok(target) = reference.parse::<Uid>() else {
            debug!(uid = ctx.uid(), reference = %reference, "Private message to non-numeric reference");
            return Ok(());
        };

        let reply = Reply::Private {
            sender: ctx.session.name(),
            text,
        };
        if !ctx.matrix.registry.send_to_uid(reply, target) {
            debug!(uid = ctx.uid(), target, "Private message not delivered");
        }
        Ok(())
    }
}
