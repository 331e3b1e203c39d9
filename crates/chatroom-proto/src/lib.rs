//! # chatroom-proto
//!
//! Wire protocol for the chatroomd server.
//!
//! The protocol is deliberately small: clients send newline-terminated text
//! lines, and the server answers with `\r\n`-terminated lines. A line that
//! starts with [`COMMAND_MARKER`] is a command, anything else is chat.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatroom_proto::{Input, Reply};
//!
//! match Input::parse("/msg 11 hi  there") {
//!     Input::Command(cmd) => {
//!         assert_eq!(cmd.name, "msg");
//!         assert_eq!(cmd.arg(0), Some("11"));
//!         assert_eq!(cmd.rest(1).as_deref(), Some("hi there"));
//!     }
//!     other => panic!("unexpected input: {other:?}"),
//! }
//!
//! let pong = Reply::Pong.to_string();
//! assert_eq!(pong, "<< pong\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod input;
pub mod limits;
pub mod line;
pub mod reply;

pub use self::error::ProtocolError;
pub use self::input::{CommandLine, Input};
pub use self::limits::{BUFFER_SZ, COMMAND_MARKER, NAME_MAX_LEN, TOPIC_MAX_LEN, truncate};
pub use self::line::LineCodec;
pub use self::reply::{HELP_LINES, Reply};
