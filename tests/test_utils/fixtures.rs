//! rstest fixtures pairing a [`JournalReceiver`] with a configuration that
//! points at it, so tests never touch the real journal.

use femtologging_journal::JournalConfig;
use rstest::fixture;
use tempfile::TempDir;

use super::JournalReceiver;

/// Receiver, matching configuration, and the directory used for fallback
/// files. The directory must outlive the writer.
pub struct JournalHarness {
    pub receiver: JournalReceiver,
    pub config: JournalConfig,
    pub shm_dir: TempDir,
}

#[fixture]
pub fn harness() -> JournalHarness {
    let receiver = JournalReceiver::bind();
    let shm_dir = TempDir::new().expect("create shm dir");
    let config = JournalConfig::default()
        .with_socket_path(receiver.path())
        .with_shm_dir(shm_dir.path());
    JournalHarness {
        receiver,
        config,
        shm_dir,
    }
}
