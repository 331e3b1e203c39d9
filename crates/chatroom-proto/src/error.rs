//! Error types for the chat line protocol.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
///
/// Framing is lossy by design (invalid UTF-8 is replaced, overlong lines are
/// truncated), so the only failure left is the transport itself.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
