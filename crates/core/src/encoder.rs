//! Encoder session: fragmentation, assembly and delivery for one channel.
//!
//! ```text
//! frame ──► Fragments ──► PacketAssembler ──► Packet::serialize ──► PacketSink
//!            (chunks)      (seq + timing)       (header ‖ payload)
//! ```
//!
//! An [`Encoder`] is owned by exactly one producer. Every mutating method
//! takes `&mut self` and the type is not `Clone`, so sequence and timing
//! state cannot be advanced from two places at once. Run one encoder per
//! channel; share a transport between them with
//! [`SharedSink`](crate::transport::SharedSink).
//!
//! If a chunk cannot be delivered the rest of its frame is dropped. The
//! sequence number of the failed chunk is already spent, so the receiver
//! sees a gap.

use crate::clock::{Clock, SystemClock};
use crate::config::EncoderConfig;
use crate::error::{Jtt1078Error, Result};
use crate::fragment::Fragments;
use crate::frame::{AudioFrame, VideoFrame};
use crate::packet::{Packet, PacketAssembler};
use crate::transport::{self, PacketSink};
use crate::wire::{DataType, Subpackage};

/// Delivery counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderStats {
    pub packets_sent: u64,
    pub bytes_sent: u64,
    pub frames_sent: u64,
    pub frames_aborted: u64,
    /// Packets that were stamped but never reached the sink.
    pub packets_failed: u64,
}

/// Session lifecycle. There is no closed state; dropping the encoder ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderState {
    /// Constructed, nothing delivered yet.
    Ready,
    /// At least one packet delivered.
    Streaming,
}

/// JT/T 1078 encoder for one logical channel.
pub struct Encoder<S, C = SystemClock> {
    config: EncoderConfig,
    ssrc: u32,
    assembler: PacketAssembler<C>,
    sink: S,
    stats: EncoderStats,
}

impl<S: PacketSink> Encoder<S> {
    /// Create an encoder timed by the system clock.
    pub fn new(config: EncoderConfig, sink: S) -> Result<Self> {
        Self::with_clock(config, sink, SystemClock)
    }
}

impl<S: PacketSink, C: Clock> Encoder<S, C> {
    /// Create an encoder with an explicit time source.
    ///
    /// The clock's current reading becomes relative timestamp 0.
    pub fn with_clock(config: EncoderConfig, sink: S, clock: C) -> Result<Self> {
        config.validate()?;

        let ssrc = rand::random::<u32>();
        let assembler = PacketAssembler::new(
            &config.sim_number,
            config.channel,
            config.video_codec.payload_type(),
            config.max_payload,
            clock,
        );

        tracing::info!(
            sim = %config.sim_number,
            channel = config.channel,
            codec = config.video_codec.name(),
            audio = ?config.audio_codec,
            ssrc = format_args!("{:#010X}", ssrc),
            "JT/T 1078 encoder created"
        );

        Ok(Self {
            config,
            ssrc,
            assembler,
            sink,
            stats: EncoderStats::default(),
        })
    }

    /// Fragment, stamp and send one video frame.
    ///
    /// Returns the number of packets sent. If any packet fails the remaining
    /// chunks are abandoned and [`Jtt1078Error::FrameAborted`] reports how
    /// many went out. An empty frame sends nothing and returns `Ok(0)`.
    pub fn encode_video_frame(&mut self, frame: &VideoFrame<'_>) -> Result<usize> {
        let data_type = frame.data_type();
        tracing::trace!(
            ?data_type,
            size = frame.data.len(),
            pts = frame.pts,
            "encoding video frame"
        );
        self.encode_chunks(frame.data, data_type)
    }

    /// Fragment, stamp and send one audio frame.
    pub fn encode_audio_frame(&mut self, frame: &AudioFrame<'_>) -> Result<usize> {
        tracing::trace!(size = frame.data.len(), pts = frame.pts, "encoding audio frame");
        self.encode_chunks(frame.data, DataType::Audio)
    }

    /// Send opaque passthrough data through the same fragmentation path.
    pub fn encode_passthrough(&mut self, data: &[u8]) -> Result<usize> {
        self.encode_chunks(data, DataType::Passthrough)
    }

    fn encode_chunks(&mut self, data: &[u8], data_type: DataType) -> Result<usize> {
        let fragments = Fragments::new(data, self.assembler.max_payload());
        let total = fragments.total();
        let mut sent = 0usize;

        for chunk in fragments {
            let result = self
                .create_packet(chunk.payload, data_type, chunk.subpackage)
                .and_then(|packet| self.send_packet(&packet));

            if let Err(e) = result {
                self.stats.frames_aborted += 1;
                tracing::warn!(
                    ?data_type,
                    sent,
                    total,
                    error = %e,
                    "frame aborted, remaining packets dropped"
                );
                return Err(Jtt1078Error::FrameAborted {
                    sent,
                    total,
                    source: Box::new(e),
                });
            }
            sent += 1;
        }

        if total > 0 {
            self.stats.frames_sent += 1;
        }

        tracing::trace!(
            ?data_type,
            packets = sent,
            frame_bytes = data.len(),
            next_seq = self.assembler.next_sequence(),
            "frame sent"
        );

        Ok(sent)
    }

    /// Build one packet from session state without sending it.
    ///
    /// Consumes a sequence number unless the payload is rejected.
    pub fn create_packet<'a>(
        &mut self,
        payload: &'a [u8],
        data_type: DataType,
        subpackage: Subpackage,
    ) -> Result<Packet<'a>> {
        self.assembler.assemble(payload, data_type, subpackage)
    }

    /// Serialize one packet and hand it to the sink.
    pub fn send_packet(&mut self, packet: &Packet<'_>) -> Result<()> {
        let result = packet
            .serialize()
            .and_then(|bytes| transport::deliver(&mut self.sink, &bytes).map(|()| bytes.len()));

        match result {
            Ok(len) => {
                self.stats.packets_sent += 1;
                self.stats.bytes_sent += len as u64;
                tracing::trace!(header = %packet.header, "packet sent");
                Ok(())
            }
            Err(e) => {
                self.stats.packets_failed += 1;
                tracing::warn!(seq = packet.header.sequence, error = %e, "packet send failed");
                Err(e)
            }
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Random synchronization source chosen at construction.
    pub fn ssrc(&self) -> u32 {
        self.ssrc
    }

    /// Sequence number the next packet will carry.
    pub fn next_sequence(&self) -> u16 {
        self.assembler.next_sequence()
    }

    pub fn stats(&self) -> EncoderStats {
        self.stats
    }

    pub fn state(&self) -> EncoderState {
        if self.stats.packets_sent > 0 {
            EncoderState::Streaming
        } else {
            EncoderState::Ready
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Tear down the session and hand back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
