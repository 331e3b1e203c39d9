//! Room-wide commands.

mod topic;

pub use topic::TopicHandler;
