use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use super::PacketSink;
use crate::error::Result;

/// Packet sink over a connected TCP stream.
///
/// Connection lifecycle (reconnects, buffer sizing) belongs to the caller;
/// a failed write surfaces as [`Jtt1078Error::Io`](crate::Jtt1078Error::Io)
/// and the caller decides whether to reconnect.
pub struct TcpSink {
    stream: TcpStream,
    peer_addr: SocketAddr,
}

impl TcpSink {
    /// Connect to a JT/T 1078 server with Nagle disabled.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        Self::from_stream(stream)
    }

    /// Wrap an already connected stream.
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        stream.set_nodelay(true)?;
        let peer_addr = stream.peer_addr()?;
        tracing::info!(%peer_addr, "connected to stream server");
        Ok(Self { stream, peer_addr })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }
}

impl PacketSink for TcpSink {
    fn send_packet(&mut self, packet: &[u8]) -> Result<usize> {
        if let Err(e) = self.stream.write_all(packet) {
            tracing::warn!(peer = %self.peer_addr, error = %e, "TCP send failed");
            return Err(e.into());
        }
        Ok(packet.len())
    }
}

impl Drop for TcpSink {
    fn drop(&mut self) {
        tracing::debug!(peer = %self.peer_addr, "stream server connection closed");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn writes_whole_packet() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let mut sink = TcpSink::connect(addr).unwrap();
        let (mut peer, _) = listener.accept().unwrap();

        assert_eq!(sink.send_packet(&[7u8; 100]).unwrap(), 100);
        let mut buf = [0u8; 100];
        peer.read_exact(&mut buf).unwrap();
        assert!(buf.iter().all(|&b| b == 7));
        assert_eq!(sink.peer_addr(), addr);
    }

    #[test]
    fn connect_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(TcpSink::connect(addr).is_err());
    }
}
