//! QUIT handler for terminating client sessions.

use crate::handlers::{CommandLine, Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use tracing::info;

/// Handler for `/quit`.
pub struct QuitHandler;

#[async_trait]
impl Handler for QuitHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _cmd: &CommandLine<'_>) -> HandlerResult {
        info!(uid = ctx.uid(), name = %ctx.session.name(), "Client quit");

        // Signal quit by returning Quit error that connection loop will handle
        Err(HandlerError::Quit)
    }
}
