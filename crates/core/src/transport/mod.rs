//! Packet delivery.
//!
//! The encoder hands every serialized packet to a [`PacketSink`]. A sink
//! has a single operation and either writes the whole buffer or fails;
//! returning fewer bytes than given counts as a failure
//! ([`Jtt1078Error::ShortWrite`]). There is no retry, timeout or
//! backpressure at this boundary.
//!
//! - [`tcp::TcpSink`]: a connected TCP stream.
//! - [`shared::SharedSink`]: serializes writes from several encoders onto one sink.
//! - [`memory::MemorySink`]: records packets in memory, with failure injection.

pub mod memory;
pub mod shared;
pub mod tcp;

pub use memory::MemorySink;
pub use shared::SharedSink;
pub use tcp::TcpSink;

use crate::error::{Jtt1078Error, Result};

/// Destination for fully serialized packets.
pub trait PacketSink {
    /// Write one packet, returning the number of bytes accepted.
    fn send_packet(&mut self, packet: &[u8]) -> Result<usize>;
}

impl<S: PacketSink + ?Sized> PacketSink for &mut S {
    fn send_packet(&mut self, packet: &[u8]) -> Result<usize> {
        (**self).send_packet(packet)
    }
}

impl<S: PacketSink + ?Sized> PacketSink for Box<S> {
    fn send_packet(&mut self, packet: &[u8]) -> Result<usize> {
        (**self).send_packet(packet)
    }
}

/// Send `packet` through `sink`, treating a short write as failure.
pub fn deliver<S: PacketSink + ?Sized>(sink: &mut S, packet: &[u8]) -> Result<()> {
    let written = sink.send_packet(packet)?;
    if written != packet.len() {
        return Err(Jtt1078Error::ShortWrite {
            written,
            expected: packet.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliver_full_write() {
        let mut sink = MemorySink::new();
        deliver(&mut sink, &[1, 2, 3]).unwrap();
        assert_eq!(sink.packets(), &[vec![1, 2, 3]]);
    }

    #[test]
    fn deliver_short_write_fails() {
        let mut sink = MemorySink::new();
        sink.short_write_at(0, 2);
        let err = deliver(&mut sink, &[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            Jtt1078Error::ShortWrite {
                written: 2,
                expected: 3
            }
        ));
    }

    #[test]
    fn boxed_sink_delegates() {
        let mut sink: Box<dyn PacketSink> = Box::new(MemorySink::new());
        deliver(&mut sink, &[9]).unwrap();
    }
}
