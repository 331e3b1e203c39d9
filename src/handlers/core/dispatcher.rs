//! Command handler registry and dispatch.
//!
//! The `Dispatcher` maps command names to handlers and keeps per-command
//! usage counters.

use super::context::{Context, Handler};
use crate::error::HandlerResult;
use crate::handlers::{
    connection::{NickHandler, PingHandler, QuitHandler},
    messaging::MsgHandler,
    room::TopicHandler,
    server_query::{HelpHandler, ListHandler},
};
use crate::telemetry::{CommandTimer, spans};
use chatroom_proto::{CommandLine, Reply};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Instrument, debug};

/// Registry of command handlers.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    /// Command usage counters
    command_counts: HashMap<&'static str, AtomicU64>,
}

impl Dispatcher {
    /// Create a dispatcher with all handlers registered.
    ///
    /// Names are matched case-sensitively.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Connection handlers
        handlers.insert("quit", Box::new(QuitHandler));
        handlers.insert("ping", Box::new(PingHandler));
        handlers.insert("nick", Box::new(NickHandler));

        // Room handlers
        handlers.insert("topic", Box::new(TopicHandler));

        // Messaging handlers
        handlers.insert("msg", Box::new(MsgHandler));

        // Query handlers
        handlers.insert("list", Box::new(ListHandler));
        handlers.insert("help", Box::new(HelpHandler));

        let command_counts = handlers
            .keys()
            .map(|&cmd| (cmd, AtomicU64::new(0)))
            .collect();

        Self {
            handlers,
            command_counts,
        }
    }

    /// Usage counts for commands that have been used, most used first.
    pub fn command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Dispatch a command line to its handler.
    ///
    /// Unknown names are answered with `<< unknown command` to the issuer.
    pub async fn dispatch(&self, ctx: &mut Context<'_>, cmd: &CommandLine<'_>) -> HandlerResult {
        let Some((&name, handler)) = self.handlers.get_key_value(cmd.name) else {
            debug!(uid = ctx.uid(), command = %cmd.name, "Unknown command");
            crate::metrics::record_command_error("unknown", "unknown_command");
            return ctx.reply(Reply::UnknownCommand).await;
        };

        if let Some(counter) = self.command_counts.get(name) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let span = spans::command(name, ctx.uid());
        let _timer = CommandTimer::new(name);
        let result = handler.handle(ctx, cmd).instrument(span).await;

        if let Err(ref e) = result {
            crate::metrics::record_command_error(name, e.error_code());
            debug!(command = %name, error = %e, "Command error");
        }

        result
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
