//! Compatibility bridge for the Rust `log` crate.
//!
//! `FemtoJournalLogAdapter` implements `log::Log` and forwards every enabled
//! record to a [`FemtoJournalHandler`]. Install it as the global logger with
//! [`install_journal_logger`].

use std::borrow::Cow;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::{
    handler::FemtoHandlerTrait,
    journal::{DIAGNOSTIC_TARGET, FemtoJournalHandler, transport::Connector, UnixConnector},
    level::FemtoLevel,
    log_record::{FemtoLogRecord, RecordMetadata},
};

/// Adapter implementing the Rust `log::Log` trait.
#[derive(Debug)]
pub struct FemtoJournalLogAdapter<C: Connector = UnixConnector> {
    handler: FemtoJournalHandler<C>,
    max_level: LevelFilter,
}

fn map_log_level(level: log::Level) -> FemtoLevel {
    match level {
        log::Level::Trace => FemtoLevel::Trace,
        log::Level::Debug => FemtoLevel::Debug,
        log::Level::Info => FemtoLevel::Info,
        log::Level::Warn => FemtoLevel::Warn,
        log::Level::Error => FemtoLevel::Error,
    }
}

impl From<log::Level> for FemtoLevel {
    fn from(level: log::Level) -> Self {
        map_log_level(level)
    }
}

fn normalise_target(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}

impl<C: Connector> FemtoJournalLogAdapter<C> {
    /// Forward records at or above `max_level` to `handler`.
    pub fn new(handler: FemtoJournalHandler<C>, max_level: LevelFilter) -> Self {
        Self { handler, max_level }
    }

    /// Convert a `log` record into the handler's record type.
    pub fn to_femto_record(record: &Record<'_>) -> FemtoLogRecord {
        let metadata = RecordMetadata {
            module_path: record.module_path().unwrap_or_default().to_string(),
            filename: record.file().unwrap_or_default().to_string(),
            line_number: record.line().unwrap_or(0),
            ..Default::default()
        };
        FemtoLogRecord::with_metadata(
            &normalise_target(record.target()),
            FemtoLevel::from(record.level()),
            &record.args().to_string(),
            metadata,
        )
    }
}

impl<C: Connector> log::Log for FemtoJournalLogAdapter<C> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level && metadata.target() != DIAGNOSTIC_TARGET
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Failures are already counted and reported by the handler.
        let _ = self.handler.handle(Self::to_femto_record(record));
    }

    fn flush(&self) {
        self.handler.flush();
    }
}

/// Install a journal adapter as the global Rust logger.
///
/// Fails when another global logger is already set.
pub fn install_journal_logger<C>(
    handler: FemtoJournalHandler<C>,
    max_level: LevelFilter,
) -> Result<(), SetLoggerError>
where
    C: Connector + 'static,
{
    log::set_boxed_logger(Box::new(FemtoJournalLogAdapter::new(handler, max_level)))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JournalConfig;
    use log::Log;
    use rstest::rstest;

    fn adapter(max_level: LevelFilter) -> FemtoJournalLogAdapter {
        let config = JournalConfig::default().with_socket_path("/nonexistent/femtologging.sock");
        FemtoJournalLogAdapter::new(FemtoJournalHandler::with_config(&config), max_level)
    }

    #[rstest]
    #[case(log::Level::Trace, FemtoLevel::Trace)]
    #[case(log::Level::Warn, FemtoLevel::Warn)]
    #[case(log::Level::Error, FemtoLevel::Error)]
    fn maps_log_levels(#[case] level: log::Level, #[case] expected: FemtoLevel) {
        assert_eq!(FemtoLevel::from(level), expected);
    }

    #[rstest]
    fn respects_max_level() {
        let adapter = adapter(LevelFilter::Info);
        let info = Metadata::builder().level(log::Level::Info).target("app").build();
        let debug = Metadata::builder().level(log::Level::Debug).target("app").build();
        assert!(adapter.enabled(&info));
        assert!(!adapter.enabled(&debug));
    }

    #[rstest]
    fn ignores_own_diagnostics() {
        let adapter = adapter(LevelFilter::Trace);
        let own = Metadata::builder()
            .level(log::Level::Warn)
            .target(DIAGNOSTIC_TARGET)
            .build();
        assert!(!adapter.enabled(&own));
    }

    #[rstest]
    fn converts_records_with_location() {
        let converted = FemtoJournalLogAdapter::<UnixConnector>::to_femto_record(
            &Record::builder()
                .args(format_args!("cache {} warmed", 3))
                .level(log::Level::Info)
                .target("app::cache")
                .module_path(Some("app::cache"))
                .file(Some("src/cache.rs"))
                .line(Some(7))
                .build(),
        );
        assert_eq!(converted.logger, "app.cache");
        assert_eq!(converted.level, FemtoLevel::Info);
        assert_eq!(converted.message, "cache 3 warmed");
        assert_eq!(converted.metadata.filename, "src/cache.rs");
        assert_eq!(converted.metadata.line_number, 7);
    }
}
