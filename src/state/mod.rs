//! State management module.
//!
//! Contains the Matrix (shared server state) and the session registry it owns.

mod broadcast;
mod matrix;
mod registry;
mod session;
mod topic;
mod uid;

pub use matrix::Matrix;
pub use registry::Registry;
pub use session::{Mailbox, Session};
pub use topic::TopicStore;
pub use uid::{Uid, UidGenerator};
