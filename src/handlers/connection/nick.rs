//! NICK handler.

use crate::handlers::{CommandLine, Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use chatroom_proto::Reply;
use tracing::info;

/// Handler for `/nick <name>`.
///
/// Only the first token is used; the name is truncated to the name limit.
/// Everyone, the renamer included, sees the old -> new announcement.
pub struct NickHandler;

#[async_trait]
impl Handler for NickHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &CommandLine<'_>) -> HandlerResult {
        let name = cmd.arg(0).ok_or(HandlerError::NeedName)?;

        let (old, new) = ctx.session.rename(name);
        info!(uid = ctx.uid(), old = %old, new = %new, "Nick changed");

        ctx.matrix.registry.send_to_all(Reply::Renamed { old, new });
        Ok(())
    }
}
