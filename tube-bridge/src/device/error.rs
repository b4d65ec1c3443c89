//! Device transport error types.

use std::time::Duration;

use crate::domain::DomainError;

/// Failure of a single send to the watch.
#[derive(Debug, thiserror::Error)]
pub enum TransmitError {
    /// The transport refused or failed to deliver the message
    #[error("message rejected: {0}")]
    Rejected(String),

    /// No acknowledgement within the configured timeout
    #[error("no acknowledgement after {0:?}")]
    Timeout(Duration),

    /// Writing to the underlying channel failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Message could not be encoded
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reason a transmission pass stopped early.
///
/// `sent` counts the messages acknowledged before the failure; they are
/// not resent or rolled back.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    /// A record's line has no firmware code; checked before the first send
    #[error("record {index} of {count} cannot be sent: {source}")]
    UnknownLine {
        index: usize,
        count: usize,
        sent: usize,
        #[source]
        source: DomainError,
    },

    /// The transport failed on a message
    #[error("message {index} of {count} failed: {source}")]
    Transmit {
        index: usize,
        count: usize,
        sent: usize,
        #[source]
        source: TransmitError,
    },
}

impl PassError {
    /// Messages delivered before the pass stopped.
    pub fn sent(&self) -> usize {
        match self {
            PassError::UnknownLine { sent, .. } | PassError::Transmit { sent, .. } => *sent,
        }
    }
}
