//! Handler forwarding [`FemtoLogRecord`] values to the journal.

use log::warn;

use crate::{
    config::JournalConfig,
    handler::{FemtoHandlerTrait, HandlerError},
    log_record::FemtoLogRecord,
    rate_limited_warner::RateLimitedWarner,
};

use super::{
    FemtoJournalWriter,
    serialise::serialise_record,
    transport::{Connector, UnixConnector},
};

/// Target of the handler's own diagnostics. The `log` bridge ignores it so a
/// failing journal cannot feed warnings back into itself.
pub const DIAGNOSTIC_TARGET: &str = "femtologging_journal::handler";

/// Handler serialising records to JSON and writing them to the journal.
///
/// Records are written synchronously on the calling thread. Failed writes are
/// returned to the caller and counted; the count is reported through
/// `log::warn!` at most once per configured interval.
#[derive(Debug)]
pub struct FemtoJournalHandler<C: Connector = UnixConnector> {
    writer: FemtoJournalWriter<C>,
    warner: RateLimitedWarner,
}

impl FemtoJournalHandler {
    /// Handler targeting the default journal socket.
    pub fn new() -> Self {
        Self::with_config(&JournalConfig::default())
    }

    /// Handler built from `config`.
    pub fn with_config(config: &JournalConfig) -> Self {
        Self::with_connector(config, UnixConnector)
    }
}

impl Default for FemtoJournalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> FemtoJournalHandler<C> {
    /// Handler whose socket comes from `connector`.
    pub fn with_connector(config: &JournalConfig, connector: C) -> Self {
        Self {
            writer: FemtoJournalWriter::with_connector(config, connector),
            warner: RateLimitedWarner::new(config.warn_interval),
        }
    }

    /// Close the journal socket.
    pub fn close(&mut self) {
        self.writer.close();
    }

    fn record_failure(&self) {
        self.warner.record_drop();
        self.warner.warn_if_due(|count| {
            warn!(target: DIAGNOSTIC_TARGET, "FemtoJournalHandler dropped {count} records");
        });
    }
}

impl<C: Connector> FemtoHandlerTrait for FemtoJournalHandler<C> {
    fn handle(&self, record: FemtoLogRecord) -> Result<(), HandlerError> {
        let payload = serialise_record(&record).inspect_err(|_| self.record_failure())?;
        self.writer
            .write_record(&payload)
            .inspect_err(|_| self.record_failure())?;
        Ok(())
    }

    fn flush(&self) -> bool {
        self.warner.flush(|count| {
            warn!(
                target: DIAGNOSTIC_TARGET,
                "FemtoJournalHandler dropped {count} records in the last interval"
            );
        });
        !self.writer.is_closed()
    }
}

impl<C: Connector> Drop for FemtoJournalHandler<C> {
    fn drop(&mut self) {
        self.close();
    }
}
