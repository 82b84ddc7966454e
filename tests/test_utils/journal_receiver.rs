//! Stand-in for journald: a Unix datagram socket bound inside a temporary
//! directory that collects what the writer sends.

use std::{
    fs::File,
    io::{IoSliceMut, Read, Seek, SeekFrom},
    os::{
        fd::{AsRawFd, FromRawFd, RawFd},
        unix::net::UnixDatagram,
    },
    path::PathBuf,
    time::Duration,
};

use nix::sys::socket::{ControlMessageOwned, MsgFlags, recvmsg};
use tempfile::TempDir;

/// Journal socket stand-in. The socket lives as long as the receiver.
pub struct JournalReceiver {
    _dir: TempDir,
    path: PathBuf,
    socket: UnixDatagram,
}

impl JournalReceiver {
    pub fn bind() -> Self {
        let dir = TempDir::new().expect("create socket dir");
        let path = dir.path().join("journal.sock");
        let socket = UnixDatagram::bind(&path).expect("bind journal socket");
        socket
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("set read timeout");
        Self {
            _dir: dir,
            path,
            socket,
        }
    }

    /// Path to pass as the socket override.
    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }

    /// Receive one datagram sent with a plain payload.
    pub fn recv_datagram(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 256 * 1024];
        let len = self.socket.recv(&mut buf).expect("receive datagram");
        buf.truncate(len);
        buf
    }

    /// Receive a zero-length datagram carrying a descriptor and return the
    /// contents of the file behind it.
    #[allow(dead_code)]
    pub fn recv_fd_payload(&self) -> Vec<u8> {
        let mut buf = [0u8; 16];
        let mut iov = [IoSliceMut::new(&mut buf)];
        let mut cmsg_space = nix::cmsg_space!([RawFd; 1]);
        let msg = recvmsg::<()>(
            self.socket.as_raw_fd(),
            &mut iov,
            Some(&mut cmsg_space),
            MsgFlags::empty(),
        )
        .expect("receive fd datagram");
        assert_eq!(msg.bytes, 0, "fd datagram must carry no payload");
        let fd = msg
            .cmsgs()
            .expect("decode control messages")
            .find_map(|cmsg| match cmsg {
                ControlMessageOwned::ScmRights(fds) => fds.first().copied(),
                _ => None,
            })
            .expect("datagram carries a descriptor");

        // SAFETY: the descriptor was just received and nothing else owns it.
        let mut file = unsafe { File::from_raw_fd(fd) };
        file.seek(SeekFrom::Start(0)).expect("rewind fallback file");
        let mut content = Vec::new();
        file.read_to_end(&mut content).expect("read fallback file");
        content
    }
}
