//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig) and loading
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Capacity and admission limits (LimitsConfig)
//! - [`validation`]: Startup sanity checks

mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ConfigError, ServerConfig};
pub use validation::{ValidationError, validate};
