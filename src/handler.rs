use thiserror::Error;

use crate::{journal::JournalError, log_record::FemtoLogRecord};

/// Errors returned when a handler cannot accept a record.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The record could not be serialised.
    #[error("failed to serialise record: {0}")]
    Serialise(#[from] serde_json::Error),
    /// The journal rejected or never received the record.
    #[error(transparent)]
    Journal(#[from] JournalError),
}

/// Trait implemented by all log handlers.
///
/// Handlers are shared between threads, so `handle` takes `&self`.
pub trait FemtoHandlerTrait: Send + Sync {
    /// Dispatch a log record for handling.
    fn handle(&self, record: FemtoLogRecord) -> Result<(), HandlerError>;

    /// Flush pending state. Returns `true` when the handler is still usable.
    fn flush(&self) -> bool {
        true
    }
}
