use std::io;

use super::PacketSink;
use crate::error::Result;

/// In-memory sink that records every packet it accepts.
///
/// Failures can be scripted by attempt number so delivery paths can be
/// exercised without a socket.
#[derive(Debug, Default)]
pub struct MemorySink {
    packets: Vec<Vec<u8>>,
    attempts: usize,
    fail_after: Option<usize>,
    short_write: Option<(usize, usize)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `count` packets, then fail every later send with `BrokenPipe`.
    pub fn fail_after(&mut self, count: usize) {
        self.fail_after = Some(count);
    }

    /// On send attempt `attempt` (zero-based), report only `written` bytes and drop the packet.
    pub fn short_write_at(&mut self, attempt: usize, written: usize) {
        self.short_write = Some((attempt, written));
    }

    /// Accept packets again.
    pub fn heal(&mut self) {
        self.fail_after = None;
        self.short_write = None;
    }

    /// Packets accepted so far, in order.
    pub fn packets(&self) -> &[Vec<u8>] {
        &self.packets
    }

    /// Number of send attempts, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn take_packets(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.packets)
    }
}

impl PacketSink for MemorySink {
    fn send_packet(&mut self, packet: &[u8]) -> Result<usize> {
        let attempt = self.attempts;
        self.attempts += 1;

        if let Some((at, written)) = self.short_write
            && at == attempt
        {
            return Ok(written.min(packet.len()));
        }
        if let Some(limit) = self.fail_after
            && self.packets.len() >= limit
        {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed").into());
        }

        self.packets.push(packet.to_vec());
        Ok(packet.len())
    }
}
