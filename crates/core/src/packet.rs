//! Packet assembly.
//!
//! [`PacketAssembler`] owns everything that goes into a header besides the
//! chunk itself: the session identity, the payload type and the
//! [`SequenceTracker`]. Each call validates the chunk, advances the tracker
//! and produces a [`Packet`] ready for serialization. No I/O happens here.

use crate::clock::Clock;
use crate::error::{Jtt1078Error, Result};
use crate::sim::{SIM_BCD_LEN, encode_bcd};
use crate::tracker::SequenceTracker;
use crate::wire::{DataType, HEADER_LEN, PacketHeader, Subpackage};

/// A header plus the chunk it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet<'a> {
    pub header: PacketHeader,
    pub payload: &'a [u8],
}

impl Packet<'_> {
    /// Total size on the wire.
    pub fn wire_len(&self) -> usize {
        HEADER_LEN + self.payload.len()
    }

    /// Serialize header and payload into one contiguous buffer.
    ///
    /// Fails with [`Jtt1078Error::BufferExhausted`] if the buffer cannot be reserved.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let len = self.wire_len();
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| Jtt1078Error::BufferExhausted { len })?;
        buf.extend_from_slice(&self.header.encode());
        buf.extend_from_slice(self.payload);
        Ok(buf)
    }
}

/// Builds packets from chunks using live session state.
#[derive(Debug)]
pub struct PacketAssembler<C> {
    sim: [u8; SIM_BCD_LEN],
    channel: u8,
    payload_type: u8,
    max_payload: usize,
    tracker: SequenceTracker<C>,
}

impl<C: Clock> PacketAssembler<C> {
    pub fn new(
        sim_number: &str,
        channel: u8,
        payload_type: u8,
        max_payload: usize,
        clock: C,
    ) -> Self {
        Self {
            sim: encode_bcd(sim_number),
            channel,
            payload_type,
            max_payload,
            tracker: SequenceTracker::new(clock),
        }
    }

    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Sequence number the next packet will carry.
    pub fn next_sequence(&self) -> u16 {
        self.tracker.sequence()
    }

    pub fn tracker(&self) -> &SequenceTracker<C> {
        &self.tracker
    }

    /// Build the packet for one chunk.
    ///
    /// Oversize payloads are rejected before any state changes, so no
    /// sequence number is consumed. Otherwise the tracker advances and the
    /// header is filled from the resulting stamp.
    pub fn assemble<'a>(
        &mut self,
        payload: &'a [u8],
        data_type: DataType,
        subpackage: Subpackage,
    ) -> Result<Packet<'a>> {
        if payload.len() > self.max_payload {
            tracing::warn!(
                len = payload.len(),
                max = self.max_payload,
                "payload exceeds maximum, packet rejected"
            );
            return Err(Jtt1078Error::PayloadTooLarge {
                len: payload.len(),
                max: self.max_payload,
            });
        }

        let stamp = self.tracker.stamp(data_type);

        let header = PacketHeader {
            marker: subpackage.is_terminal(),
            payload_type: self.payload_type,
            sequence: stamp.sequence,
            sim: self.sim,
            channel: self.channel,
            data_type,
            subpackage,
            timestamp: stamp.timestamp,
            last_i_frame_interval: stamp.i_frame_interval,
            last_frame_interval: stamp.frame_interval,
            payload_len: payload.len() as u16,
        };

        Ok(Packet { header, payload })
    }
}
