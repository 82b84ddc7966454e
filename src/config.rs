//! Configuration for journal writers and handlers.
//!
//! [`JournalConfig`] is plain data with `with_*` setters. It can also be read
//! from an INI file through `rust-ini`, using a `[handler_journal]` section:
//!
//! ```ini
//! [handler_journal]
//! socket = /run/systemd/journal/socket
//! shm_dir = /dev/shm
//! pool_capacity = 16
//! warn_interval_ms = 5000
//! ```
//!
//! Every key is optional. An empty `socket` selects the default journal
//! socket.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use ini::{Ini, Properties};

use crate::{
    handlers::HandlerBuildError,
    journal::{DEFAULT_POOL_CAPACITY, DEFAULT_SHM_DIR},
    rate_limited_warner::DEFAULT_WARN_INTERVAL,
};

/// INI section holding journal settings.
pub const INI_SECTION: &str = "handler_journal";

/// Settings shared by [`FemtoJournalWriter`](crate::FemtoJournalWriter) and
/// [`FemtoJournalHandler`](crate::FemtoJournalHandler).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalConfig {
    /// Destination socket override. `None` or empty uses the default.
    pub socket_path: Option<PathBuf>,
    /// Directory for the oversized record fallback files.
    pub shm_dir: PathBuf,
    /// Idle encode buffers kept for reuse.
    pub pool_capacity: usize,
    /// Minimum interval between dropped-record warnings.
    pub warn_interval: Duration,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            socket_path: None,
            shm_dir: PathBuf::from(DEFAULT_SHM_DIR),
            pool_capacity: DEFAULT_POOL_CAPACITY,
            warn_interval: DEFAULT_WARN_INTERVAL,
        }
    }
}

impl JournalConfig {
    /// Override the destination socket.
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Override the fallback directory.
    pub fn with_shm_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shm_dir = dir.into();
        self
    }

    /// Override the number of pooled buffers.
    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Override the warning interval.
    pub fn with_warn_interval(mut self, interval: Duration) -> Self {
        self.warn_interval = interval;
        self
    }

    /// Check the values a handler cannot run with.
    pub fn validate(&self) -> Result<(), HandlerBuildError> {
        if self.pool_capacity == 0 {
            return Err(HandlerBuildError::InvalidConfig(
                "pool_capacity must be greater than zero".into(),
            ));
        }
        if self.shm_dir.as_os_str().is_empty() {
            return Err(HandlerBuildError::InvalidConfig(
                "shm_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Load settings from the `[handler_journal]` section of an INI file.
    ///
    /// A file without that section yields the defaults.
    pub fn from_ini_file(path: impl AsRef<Path>) -> Result<Self, HandlerBuildError> {
        let path = path.as_ref();
        let ini = Ini::load_from_file(path).map_err(|err| match err {
            ini::Error::Io(io) => HandlerBuildError::Io(io),
            ini::Error::Parse(parse) => {
                HandlerBuildError::InvalidConfig(format!("{}: {parse}", path.display()))
            }
        })?;
        Self::from_ini(&ini)
    }

    /// Load settings from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, HandlerBuildError> {
        let ini = Ini::load_from_str(text)
            .map_err(|err| HandlerBuildError::InvalidConfig(err.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, HandlerBuildError> {
        let mut config = Self::default();
        let Some(section) = ini.section(Some(INI_SECTION)) else {
            return Ok(config);
        };
        if let Some(socket) = section.get("socket") {
            config.socket_path = Some(PathBuf::from(socket));
        }
        if let Some(dir) = section.get("shm_dir") {
            config.shm_dir = PathBuf::from(dir);
        }
        if let Some(capacity) = parse_key::<usize>(section, "pool_capacity")? {
            config.pool_capacity = capacity;
        }
        if let Some(ms) = parse_key::<u64>(section, "warn_interval_ms")? {
            config.warn_interval = Duration::from_millis(ms);
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_key<T: FromStr>(section: &Properties, key: &str) -> Result<Option<T>, HandlerBuildError> {
    section
        .get(key)
        .map(|raw| {
            raw.trim().parse().map_err(|_| {
                HandlerBuildError::InvalidConfig(format!("{key} must be an integer, got {raw:?}"))
            })
        })
        .transpose()
}
