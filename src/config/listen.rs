//! Network listener configuration.

use serde::Deserialize;
use std::net::SocketAddr;

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (default: "0.0.0.0:5000").
    #[serde(default = "default_address")]
    pub address: SocketAddr,
    /// Pending-connection backlog passed to listen(2) (default: 10).
    #[serde(default = "default_backlog")]
    pub backlog: u32,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            backlog: default_backlog(),
        }
    }
}

fn default_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn default_backlog() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_port_and_backlog() {
        let config = ListenConfig::default();
        assert_eq!(config.address.port(), 5000);
        assert!(config.address.ip().is_unspecified());
        assert_eq!(config.backlog, 10);
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let config: ListenConfig = toml::from_str(r#"address = "127.0.0.1:6000""#).unwrap();
        assert_eq!(config.address.port(), 6000);
        assert_eq!(config.backlog, 10);
    }
}
