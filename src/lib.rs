//! Journal native protocol sink for femtologging.
//!
//! Raw JSON log records are encoded into systemd journal export fields and
//! sent to journald over a Unix datagram socket. Records too large for a
//! single datagram are handed over as a file descriptor.

pub mod config;
pub mod handler;
pub mod handlers;
pub mod journal;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
pub mod log_record;
pub mod rate_limited_warner;
pub mod record;

pub use config::JournalConfig;
pub use handler::{FemtoHandlerTrait, HandlerError};
pub use handlers::{HandlerBuildError, HandlerBuilderTrait, JournalHandlerBuilder};
pub use journal::{FemtoJournalHandler, FemtoJournalWriter, JournalError, Priority};
pub use level::FemtoLevel;
#[cfg(feature = "log-compat")]
pub use log_compat::{FemtoJournalLogAdapter, install_journal_logger};
pub use log_record::{FemtoLogRecord, RecordMetadata};
pub use record::DecodedRecord;
