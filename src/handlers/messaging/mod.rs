//! Messaging: room chat and private messages.

mod chat;
mod msg;

pub use chat::broadcast_chat;
pub use msg::MsgHandler;
