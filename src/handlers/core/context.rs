//! Command handler context and core types.

use crate::error::HandlerResult;
use crate::state::{Matrix, Session, Uid};
use async_trait::async_trait;
use chatroom_proto::{CommandLine, Reply};
use std::sync::Arc;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The session that issued the command.
    pub session: &'a Arc<Session>,
    /// Shared server state.
    pub matrix: &'a Arc<Matrix>,
}

impl<'a> Context<'a> {
    pub fn new(session: &'a Arc<Session>, matrix: &'a Arc<Matrix>) -> Self {
        Self { session, matrix }
    }

    /// The issuing session's uid.
    #[inline]
    pub fn uid(&self) -> Uid {
        self.session.uid()
    }

    /// Send a reply to the issuing session only.
    #[inline]
    pub async fn reply(&self, reply: Reply) -> HandlerResult {
        self.session.send(reply).await?;
        Ok(())
    }
}

/// A command handler.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &CommandLine<'_>) -> HandlerResult;
}
