//! Reusable scratch buffers for record encoding.
//!
//! Idle buffers sit in a bounded `crossbeam_channel` which acts as a
//! lock-free free list. A checkout pops an idle buffer or allocates a fresh
//! one; dropping the [`PooledBuffer`] guard pushes it back, or discards it
//! when the pool is already full.

use std::ops::{Deref, DerefMut};

use crossbeam_channel::{Receiver, Sender, bounded};

/// Default number of idle buffers retained by a pool.
pub const DEFAULT_POOL_CAPACITY: usize = 16;
/// Capacity given to freshly allocated buffers.
const INITIAL_BUFFER_CAPACITY: usize = 1024;
/// Buffers grown past this size are shrunk before going back to the pool.
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// Pool of byte buffers shared between concurrent writers.
#[derive(Debug)]
pub struct BufferPool {
    idle_tx: Sender<Vec<u8>>,
    idle_rx: Receiver<Vec<u8>>,
}

impl BufferPool {
    /// Create a pool retaining at most `capacity` idle buffers.
    pub fn new(capacity: usize) -> Self {
        let (idle_tx, idle_rx) = bounded(capacity);
        Self { idle_tx, idle_rx }
    }

    /// Take a buffer out of the pool. Its length is always zero.
    pub fn checkout(&self) -> PooledBuffer<'_> {
        let mut buf = self
            .idle_rx
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(INITIAL_BUFFER_CAPACITY));
        buf.clear();
        PooledBuffer { pool: self, buf }
    }

    /// Number of buffers currently waiting for reuse.
    pub fn idle(&self) -> usize {
        self.idle_rx.len()
    }

    fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            buf.clear();
            buf.shrink_to(MAX_RETAINED_CAPACITY);
        }
        // A full pool simply drops the buffer.
        let _ = self.idle_tx.try_send(buf);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

/// Buffer checked out of a [`BufferPool`], returned when dropped.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::{sync::Arc, thread};

    #[rstest]
    fn checkout_resets_length_and_reuses_capacity() {
        let pool = BufferPool::new(1);
        {
            let mut buf = pool.checkout();
            buf.extend_from_slice(&[1u8; 4096]);
        }
        assert_eq!(pool.idle(), 1);
        let buf = pool.checkout();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 4096);
        assert_eq!(pool.idle(), 0);
    }

    #[rstest]
    fn release_happens_on_error_paths() {
        let pool = BufferPool::new(2);
        let outcome: Result<(), &str> = (|| {
            let mut buf = pool.checkout();
            buf.push(1);
            Err("encode failed")
        })();
        assert!(outcome.is_err());
        assert_eq!(pool.idle(), 1);
    }

    #[rstest]
    fn full_pool_discards_extra_buffers() {
        let pool = BufferPool::new(1);
        let first = pool.checkout();
        let second = pool.checkout();
        drop(first);
        drop(second);
        assert_eq!(pool.idle(), 1);
    }

    #[rstest]
    fn oversized_buffers_are_shrunk() {
        let pool = BufferPool::new(1);
        {
            let mut buf = pool.checkout();
            buf.resize(MAX_RETAINED_CAPACITY * 4, 0);
        }
        let buf = pool.checkout();
        assert!(buf.capacity() <= MAX_RETAINED_CAPACITY * 2);
    }

    #[rstest]
    fn concurrent_checkouts_never_share_buffers() {
        let pool = Arc::new(BufferPool::new(4));
        let handles: Vec<_> = (0..8u8)
            .map(|id| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let mut buf = pool.checkout();
                        assert!(buf.is_empty());
                        buf.extend_from_slice(&[id; 32]);
                        assert!(buf.iter().all(|b| *b == id));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker thread panicked");
        }
        assert!(pool.idle() <= 4);
    }
}
