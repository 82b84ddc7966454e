//! Datagram transport primitives for the journal socket.
//!
//! [`JournalTransport`] is the seam between the protocol logic and the
//! operating system. Only [`UnixDatagramTransport`] knows how to bind an
//! autobound Unix socket and pass descriptors with `SCM_RIGHTS`.

use std::{
    io::{self, IoSlice},
    os::{
        fd::{AsRawFd, BorrowedFd},
        unix::net::UnixDatagram,
    },
    path::Path,
};

use nix::sys::socket::{
    AddressFamily, ControlMessage, MsgFlags, SockFlag, SockType, UnixAddr, bind, sendmsg, socket,
};

/// Connectionless transport used to reach the journal daemon.
pub trait JournalTransport: Send + Sync {
    /// Send `payload` as a single datagram to `destination`.
    fn send_to(&self, payload: &[u8], destination: &Path) -> io::Result<usize>;

    /// Send a zero-length datagram carrying `fd` as ancillary data.
    fn send_fd_to(&self, fd: BorrowedFd<'_>, destination: &Path) -> io::Result<usize>;
}

/// Factory producing the local endpoint of a journal session.
pub trait Connector: Send + Sync {
    type Transport: JournalTransport;

    /// Bind a fresh local endpoint.
    fn bind(&self) -> io::Result<Self::Transport>;
}

/// Connector binding Unix datagram sockets to a kernel-assigned address.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnixConnector;

impl Connector for UnixConnector {
    type Transport = UnixDatagramTransport;

    fn bind(&self) -> io::Result<Self::Transport> {
        UnixDatagramTransport::autobind()
    }
}

/// Unix datagram socket bound to an autobind address.
#[derive(Debug)]
pub struct UnixDatagramTransport {
    socket: UnixDatagram,
}

impl UnixDatagramTransport {
    /// Create a datagram socket and let the kernel pick its address.
    pub fn autobind() -> io::Result<Self> {
        let fd = socket(
            AddressFamily::Unix,
            SockType::Datagram,
            SockFlag::SOCK_CLOEXEC,
            None,
        )?;
        // An address holding only the family triggers Linux autobind.
        bind(fd.as_raw_fd(), &UnixAddr::new_unnamed())?;
        Ok(Self {
            socket: UnixDatagram::from(fd),
        })
    }

    /// Address assigned by the kernel.
    pub fn local_addr(&self) -> io::Result<std::os::unix::net::SocketAddr> {
        self.socket.local_addr()
    }
}

impl JournalTransport for UnixDatagramTransport {
    fn send_to(&self, payload: &[u8], destination: &Path) -> io::Result<usize> {
        self.socket.send_to(payload, destination)
    }

    fn send_fd_to(&self, fd: BorrowedFd<'_>, destination: &Path) -> io::Result<usize> {
        let addr = UnixAddr::new(destination)?;
        let fds = [fd.as_raw_fd()];
        let cmsgs = [ControlMessage::ScmRights(&fds)];
        let iov: [IoSlice<'_>; 0] = [];
        let sent = sendmsg(
            self.socket.as_raw_fd(),
            &iov,
            &cmsgs,
            MsgFlags::empty(),
            Some(&addr),
        )?;
        Ok(sent)
    }
}
