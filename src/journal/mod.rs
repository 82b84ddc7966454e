//! systemd journal sink.
//!
//! [`FemtoJournalWriter`] turns raw JSON log records into journal native
//! protocol datagrams and sends them over a Unix datagram socket. The socket
//! is bound lazily, once per writer. Records that exceed the datagram size
//! limits are written to an unlinked file in `/dev/shm` whose descriptor is
//! passed to journald instead. [`FemtoJournalHandler`] sits on top and accepts
//! [`FemtoLogRecord`](crate::log_record::FemtoLogRecord) values.

pub mod encoder;
mod error;
pub mod fallback;
mod handler;
pub mod pool;
mod priority;
mod serialise;
pub mod session;
pub mod transport;
mod writer;


pub use error::JournalError;
pub use fallback::DEFAULT_SHM_DIR;
pub use handler::{DIAGNOSTIC_TARGET, FemtoJournalHandler};
pub use pool::{BufferPool, DEFAULT_POOL_CAPACITY, PooledBuffer};
pub use priority::Priority;
pub use serialise::serialise_record;
pub use session::{DEFAULT_JOURNAL_SOCKET, JournalSession};
pub use transport::{Connector, JournalTransport, UnixConnector, UnixDatagramTransport};
pub use writer::FemtoJournalWriter;
