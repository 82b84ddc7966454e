//! Lazily initialised journal socket session.
//!
//! The first send binds the local endpoint and resolves the destination.
//! Concurrent first callers block on the same [`OnceCell`]; exactly one of them
//! runs the setup and all observe its outcome. A failed setup is stored and
//! handed to every later caller without another attempt. Once the cell is
//! filled, sends only read it.

use std::{
    io,
    os::fd::BorrowedFd,
    path::{Path, PathBuf},
    sync::Arc,
};

use once_cell::sync::OnceCell;

use super::{
    JournalError,
    transport::{Connector, JournalTransport, UnixConnector},
};

/// Socket journald listens on for native protocol datagrams.
pub const DEFAULT_JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

/// Local endpoint paired with the resolved destination.
#[derive(Debug)]
pub struct Endpoint<T> {
    transport: T,
    destination: PathBuf,
}

impl<T> Endpoint<T> {
    /// Path datagrams are addressed to.
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

type SessionState<T> = OnceCell<Result<Endpoint<T>, Arc<io::Error>>>;

/// Journal socket session shared by all writes of a sink.
pub struct JournalSession<C: Connector = UnixConnector> {
    connector: C,
    socket_override: Option<PathBuf>,
    state: SessionState<C::Transport>,
    closed: bool,
}

impl<C: Connector> JournalSession<C> {
    /// Create an uninitialised session. An empty override selects
    /// [`DEFAULT_JOURNAL_SOCKET`].
    pub fn new(connector: C, socket_override: Option<PathBuf>) -> Self {
        Self {
            connector,
            socket_override,
            state: OnceCell::new(),
            closed: false,
        }
    }

    /// Return the endpoint, initialising it on first use.
    pub fn endpoint(&self) -> Result<&Endpoint<C::Transport>, JournalError> {
        if self.closed {
            return Err(JournalError::Closed);
        }
        self.state
            .get_or_init(|| self.establish().map_err(Arc::new))
            .as_ref()
            .map_err(|err| JournalError::Initialization(Arc::clone(err)))
    }

    /// Send one datagram to the journal.
    pub fn send(&self, payload: &[u8]) -> Result<usize, JournalError> {
        let endpoint = self.endpoint()?;
        endpoint
            .transport
            .send_to(payload, &endpoint.destination)
            .map_err(JournalError::Transmission)
    }

    /// Pass `fd` to the journal as `SCM_RIGHTS` ancillary data.
    pub fn send_fd(&self, fd: BorrowedFd<'_>) -> Result<usize, JournalError> {
        let endpoint = self.endpoint()?;
        endpoint
            .transport
            .send_fd_to(fd, &endpoint.destination)
            .map_err(JournalError::Fallback)
    }

    /// Release the local endpoint. Later sends fail with
    /// [`JournalError::Closed`].
    pub fn close(&mut self) {
        self.closed = true;
        self.state.take();
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn establish(&self) -> io::Result<Endpoint<C::Transport>> {
        let destination = match &self.socket_override {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => PathBuf::from(DEFAULT_JOURNAL_SOCKET),
        };
        let transport = self.connector.bind()?;
        Ok(Endpoint {
            transport,
            destination,
        })
    }
}

impl<C: Connector> std::fmt::Debug for JournalSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state.get() {
            None => "uninitialised",
            Some(Ok(_)) => "ready",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("JournalSession")
            .field("socket_override", &self.socket_override)
            .field("state", &state)
            .field("closed", &self.closed)
            .finish()
    }
}
