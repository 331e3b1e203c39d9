//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("limits.max_clients must be at least 1")]
    ZeroMaxClients,
    #[error("limits.mailbox_capacity must be at least 1")]
    ZeroMailboxCapacity,
    #[error("limits.accept_rate_per_second must be at least 1")]
    ZeroAcceptRate,
    #[error("limits.accept_burst must be at least 1")]
    ZeroAcceptBurst,
    #[error("listen.backlog must be at least 1")]
    ZeroBacklog,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let limits = &config.limits;

    if limits.max_clients == 0 {
        errors.push(ValidationError::ZeroMaxClients);
    }
    if limits.mailbox_capacity == 0 {
        errors.push(ValidationError::ZeroMailboxCapacity);
    }
    if limits.accept_rate_per_second == 0 {
        errors.push(ValidationError::ZeroAcceptRate);
    }
    if limits.accept_burst == 0 {
        errors.push(ValidationError::ZeroAcceptBurst);
    }
    if config.listen.backlog == 0 {
        errors.push(ValidationError::ZeroBacklog);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
