//! Builder for [`FemtoJournalHandler`](crate::journal::FemtoJournalHandler).

use std::{path::PathBuf, time::Duration};

use crate::{config::JournalConfig, journal::FemtoJournalHandler};

use super::{HandlerBuildError, HandlerBuilderTrait};

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`FemtoJournalHandler`] instances.
#[derive(Clone, Debug, Default)]
pub struct JournalHandlerBuilder {
    base: Option<JournalConfig>,
    socket_path: Option<PathBuf>,
    shm_dir: Option<PathBuf>,
    pool_capacity: Option<usize>,
    warn_interval_ms: Option<u64>,
}

impl JournalHandlerBuilder {
    /// Create a builder targeting the default journal socket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one read from INI.
    pub fn from_config(config: JournalConfig) -> Self {
        Self {
            base: Some(config),
            ..Self::default()
        }
    }

    /// Send records to `path` instead of the default journal socket.
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Directory used for oversized record files.
    pub fn with_shm_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shm_dir = Some(dir.into());
        self
    }

    option_setter!(
        #[doc = "Set the number of idle encode buffers kept for reuse."]
        with_pool_capacity,
        pool_capacity,
        usize
    );
    option_setter!(
        #[doc = "Set the minimum interval between dropped-record warnings."]
        with_warn_interval_ms,
        warn_interval_ms,
        u64
    );

    fn build_config(&self) -> Result<JournalConfig, HandlerBuildError> {
        let mut config = self.base.clone().unwrap_or_default();
        if let Some(path) = &self.socket_path {
            config.socket_path = Some(path.clone());
        }
        if let Some(dir) = &self.shm_dir {
            config.shm_dir = dir.clone();
        }
        if let Some(capacity) = self.pool_capacity {
            config.pool_capacity = capacity;
        }
        if let Some(ms) = self.warn_interval_ms {
            config.warn_interval = Duration::from_millis(ms);
        }
        config.validate()?;
        Ok(config)
    }
}

impl HandlerBuilderTrait for JournalHandlerBuilder {
    type Handler = FemtoJournalHandler;

    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError> {
        let config = self.build_config()?;
        Ok(FemtoJournalHandler::with_config(&config))
    }
}
