//! Connection-level commands: liveness, leaving, and identity.

mod nick;
mod ping;
mod quit;

pub use nick::NickHandler;
pub use ping::PingHandler;
pub use quit::QuitHandler;
