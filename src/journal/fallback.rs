//! Descriptor hand-off for records too large for one datagram.
//!
//! The encoded record is written to an anonymous file in a memory-backed
//! directory and the journal receives only its descriptor. `tempfile` unlinks
//! the file before returning it, so nothing is left behind if the process
//! dies mid-send.

use std::{
    io::{self, Write},
    os::fd::AsFd,
    path::Path,
};

use nix::errno::Errno;

use super::{JournalError, session::JournalSession, transport::Connector};

/// Default directory for fallback files.
pub const DEFAULT_SHM_DIR: &str = "/dev/shm";

/// Whether `err` means the datagram exceeded the socket's size limits.
pub fn is_size_limit(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error().map(Errno::from_raw),
        Some(Errno::EMSGSIZE | Errno::ENOBUFS)
    )
}

/// Send `payload` through an unlinked file in `shm_dir`.
///
/// Returns the payload length on success. The file descriptor is closed when
/// this function returns, whichever step failed.
pub fn send_oversized<C: Connector>(
    session: &JournalSession<C>,
    shm_dir: &Path,
    payload: &[u8],
) -> Result<usize, JournalError> {
    let mut file = tempfile::tempfile_in(shm_dir).map_err(JournalError::Fallback)?;
    file.write_all(payload).map_err(JournalError::Fallback)?;
    session.send_fd(file.as_fd())?;
    Ok(payload.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Errno::EMSGSIZE, true)]
    #[case(Errno::ENOBUFS, true)]
    #[case(Errno::ECONNREFUSED, false)]
    #[case(Errno::ENOENT, false)]
    #[case(Errno::EAGAIN, false)]
    fn classifies_size_limit_errors(#[case] errno: Errno, #[case] expected: bool) {
        assert_eq!(is_size_limit(&io::Error::from(errno)), expected);
    }

    #[rstest]
    fn errors_without_os_code_are_not_size_limits() {
        assert!(!is_size_limit(&io::Error::other("synthetic")));
    }
}
