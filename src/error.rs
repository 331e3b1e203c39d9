//! Unified error handling for chatroomd.
//!
//! Handler errors stay inside the session that produced them: usage errors
//! become a canned reply to the issuer, everything else ends that session.

use chatroom_proto::Reply;
use thiserror::Error;

use crate::state::Uid;

// ============================================================================
// Delivery Errors (mailbox operations)
// ============================================================================

/// Failure to queue a line on a session's mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("mailbox full for uid {0}")]
    MailboxFull(Uid),

    #[error("mailbox closed for uid {0}")]
    Closed(Uid),

    #[error("mailbox send timed out for uid {0}")]
    Timeout(Uid),
}

impl DeliveryError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MailboxFull(_) => "mailbox_full",
            Self::Closed(_) => "closed",
            Self::Timeout(_) => "timeout",
        }
    }
}

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("message cannot be null")]
    NeedMessage,

    #[error("name cannot be null")]
    NeedName,

    #[error("reference cannot be null")]
    NeedReference,

    #[error("client quit")]
    Quit,

    #[error("send error: {0}")]
    Send(#[from] DeliveryError),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMessage => "need_message",
            Self::NeedName => "need_name",
            Self::NeedReference => "need_reference",
            Self::Quit => "quit",
            Self::Send(_) => "send_error",
        }
    }

    /// Convert to the reply shown to the issuing session.
    ///
    /// Returns `None` for errors that end the session instead.
    pub fn to_reply(&self) -> Option<Reply> {
        match self {
            Self::NeedMessage => Some(Reply::MessageCannotBeNull),
            Self::NeedName => Some(Reply::NameCannotBeNull),
            Self::NeedReference => Some(Reply::ReferenceCannotBeNull),
            Self::Quit | Self::Send(_) => None,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
