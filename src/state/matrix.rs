//! Matrix - the shared server state.
//!
//! Holds everything sessions share: the registry of live sessions, the room
//! topic and the uid counter. Created once at startup and shared by `Arc`.

use crate::config::LimitsConfig;

use super::{Registry, TopicStore, UidGenerator};

/// Shared server state.
pub struct Matrix {
    /// Live sessions.
    pub registry: Registry,
    /// Room topic.
    pub topic: TopicStore,
    /// Uid source for newly admitted sessions.
    pub uid_gen: UidGenerator,
    /// Capacity and admission limits.
    pub limits: LimitsConfig,
}

impl Matrix {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            registry: Registry::new(limits.max_clients),
            topic: TopicStore::new(),
            uid_gen: UidGenerator::new(limits.uid_start),
            limits: limits.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_matrix_uses_limits() {
        let limits = LimitsConfig {
            max_clients: 3,
            uid_start: 42,
            ..LimitsConfig::default()
        };
        let matrix = Matrix::new(&limits);
        assert_eq!(matrix.registry.capacity(), 3);
        assert_eq!(matrix.registry.count(), 0);
        assert_eq!(matrix.uid_gen.next(), 42);
        assert_eq!(matrix.topic.get(), "");
    }
}
