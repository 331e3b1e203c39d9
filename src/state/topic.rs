//! The shared room topic.

use chatroom_proto::{TOPIC_MAX_LEN, truncate};
use parking_lot::RwLock;

/// Single shared topic string, empty until first set.
///
/// Reads clone under the lock, so a reader always sees a whole value.
#[derive(Debug, Default)]
pub struct TopicStore {
    topic: RwLock<String>,
}

impl TopicStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> String {
        self.topic.read().clone()
    }

    /// Replace the topic, truncated to [`TOPIC_MAX_LEN`] bytes. Returns the stored value.
    pub fn set(&self, topic: &str) -> String {
        let topic = truncate(topic, TOPIC_MAX_LEN).to_string();
        *self.topic.write() = topic.clone();
        topic
    }
}
