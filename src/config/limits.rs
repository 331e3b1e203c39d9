//! Capacity and admission limits configuration.

use serde::Deserialize;

/// Capacity and admission limits.
///
/// Defaults reproduce the classic fixed constants: 100 clients, uids from 10.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum concurrently connected sessions (default: 100).
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,
    /// Per-session outbound mailbox capacity in lines (default: 256).
    /// A recipient whose mailbox is full misses broadcast lines.
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
    /// Sustained connection accept rate (default: 10 per second).
    #[serde(default = "default_accept_rate_per_second")]
    pub accept_rate_per_second: u32,
    /// Accept burst allowance before the rate applies (default: 10).
    #[serde(default = "default_accept_burst")]
    pub accept_burst: u32,
    /// First uid handed out (default: 10).
    #[serde(default = "default_uid_start")]
    pub uid_start: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_clients: default_max_clients(),
            mailbox_capacity: default_mailbox_capacity(),
            accept_rate_per_second: default_accept_rate_per_second(),
            accept_burst: default_accept_burst(),
            uid_start: default_uid_start(),
        }
    }
}

fn default_max_clients() -> usize {
    100
}

fn default_mailbox_capacity() -> usize {
    256
}

fn default_accept_rate_per_second() -> u32 {
    10
}

fn default_accept_burst() -> u32 {
    10
}

fn default_uid_start() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let config = LimitsConfig::default();
        assert_eq!(config.max_clients, 100);
        assert_eq!(config.mailbox_capacity, 256);
        assert_eq!(config.accept_rate_per_second, 10);
        assert_eq!(config.accept_burst, 10);
        assert_eq!(config.uid_start, 10);
    }

    #[test]
    fn empty_table_uses_defaults() {
        let config: LimitsConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_clients, 100);
        assert_eq!(config.uid_start, 10);
    }

    #[test]
    fn overrides_are_applied() {
        let config: LimitsConfig =
            toml::from_str("max_clients = 2\naccept_rate_per_second = 500").unwrap();
        assert_eq!(config.max_clients, 2);
        assert_eq!(config.accept_rate_per_second, 500);
        assert_eq!(config.accept_burst, 10);
    }
}
