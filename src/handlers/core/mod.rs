//! Core handler infrastructure.
//!
//! This module contains the fundamental types for the command handler
//! system: the [`Handler`] trait, the [`Context`] passed to every handler and
//! the [`Dispatcher`] that routes a parsed command line to its handler.

pub mod context;
pub mod dispatcher;
#[cfg(test)]
pub mod testing;

pub use context::{Context, Handler};
pub use dispatcher::Dispatcher;
