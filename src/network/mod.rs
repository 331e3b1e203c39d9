//! Network module.
//!
//! Contains the Gateway (TCP listener), the per-session Connection task and
//! accept throttling.

mod connection;
mod gateway;
pub mod throttle;

pub use connection::Connection;
pub use gateway::Gateway;
