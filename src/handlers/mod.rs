//! Chat command handlers.
//!
//! This module contains the [`Handler`] trait and the [`Dispatcher`] that
//! routes command lines to handlers, plus the plain chat relay.
//!
//! Handlers receive a [`CommandLine`] borrowing from the line read off the
//! socket. Use `cmd.arg(n)` for single tokens and `cmd.rest(n)` for
//! free text.

mod connection;
mod core;
mod messaging;
mod room;
mod server_query;

pub use self::core::{Context, Dispatcher, Handler};
pub use crate::error::{HandlerError, HandlerResult};
pub use chatroom_proto::CommandLine;
pub use messaging::broadcast_chat;
