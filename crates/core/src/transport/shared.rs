use std::sync::Arc;

use parking_lot::Mutex;

use super::PacketSink;
use crate::error::Result;

/// A sink shared by several encoders.
///
/// Each packet is written while holding the lock, so packets from different
/// channels never interleave on the underlying transport. Sequence numbers
/// and timing stay per encoder; the lock only protects the transport.
pub struct SharedSink<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> SharedSink<S> {
    pub fn new(sink: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    /// Run `f` with exclusive access to the wrapped sink.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl<S> Clone for SharedSink<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: PacketSink> PacketSink for SharedSink<S> {
    fn send_packet(&mut self, packet: &[u8]) -> Result<usize> {
        self.inner.lock().send_packet(packet)
    }
}
