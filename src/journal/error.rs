use std::{io, sync::Arc};

use thiserror::Error;

/// Errors returned by [`FemtoJournalWriter`](super::FemtoJournalWriter).
#[derive(Debug, Error)]
pub enum JournalError {
    /// Binding the local endpoint failed. Returned to every later caller.
    #[error("journal endpoint initialisation failed: {0}")]
    Initialization(Arc<io::Error>),
    /// The raw record is not a JSON object.
    #[error("failed to decode log record: {0}")]
    Decode(#[from] serde_json::Error),
    /// Sending the datagram failed for a reason other than its size.
    #[error("journal send failed: {0}")]
    Transmission(#[source] io::Error),
    /// Handing the record over through a memory-backed file failed.
    #[error("journal fd fallback failed: {0}")]
    Fallback(#[source] io::Error),
    /// The writer has been closed.
    #[error("journal writer is closed")]
    Closed,
}
