//! Entry point turning raw JSON records into journal datagrams.

use std::path::PathBuf;

use crate::{config::JournalConfig, record::DecodedRecord};

use super::{
    JournalError,
    encoder::encode_record,
    fallback::{is_size_limit, send_oversized},
    pool::BufferPool,
    session::JournalSession,
    transport::{Connector, UnixConnector},
};

/// Writer sending raw JSON records to the systemd journal.
///
/// Writes are synchronous and may be issued concurrently through `&self`.
/// Nothing is logged, queued or retried here; every failure is returned to
/// the caller and the record is dropped.
#[derive(Debug)]
pub struct FemtoJournalWriter<C: Connector = UnixConnector> {
    session: JournalSession<C>,
    pool: BufferPool,
    shm_dir: PathBuf,
}

impl FemtoJournalWriter {
    /// Writer targeting the default journal socket.
    pub fn new() -> Self {
        Self::with_config(&JournalConfig::default())
    }

    /// Writer using the socket path and pool settings from `config`.
    pub fn with_config(config: &JournalConfig) -> Self {
        Self::with_connector(config, UnixConnector)
    }
}

impl Default for FemtoJournalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> FemtoJournalWriter<C> {
    /// Writer whose local endpoint is produced by `connector`.
    pub fn with_connector(config: &JournalConfig, connector: C) -> Self {
        Self {
            session: JournalSession::new(connector, config.socket_path.clone()),
            pool: BufferPool::new(config.pool_capacity),
            shm_dir: config.shm_dir.clone(),
        }
    }

    /// Encode `raw` and send it to the journal.
    ///
    /// Returns the number of encoded bytes the journal accepted. Records too
    /// large for a datagram are passed as a file descriptor and still report
    /// their full encoded length.
    pub fn write_record(&self, raw: &[u8]) -> Result<usize, JournalError> {
        self.session.endpoint()?;
        let record = DecodedRecord::from_slice(raw)?;

        let mut buf = self.pool.checkout();
        encode_record(&record, raw, &mut buf);

        match self.session.send(&buf) {
            Err(JournalError::Transmission(err)) if is_size_limit(&err) => {
                send_oversized(&self.session, &self.shm_dir, &buf)
            }
            other => other,
        }
    }

    /// Close the local socket. Safe to call repeatedly.
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Whether the writer has been closed.
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &BufferPool {
        &self.pool
    }
}
