//! JT/T 1078 packetizer.
//!
//! Packages H.264/H.265 video and audio frames into the JT/T 1078
//! RTP-derived wire format for delivery to a vehicle video monitoring
//! platform over a byte stream.
//!
//! ```no_run
//! use jtt1078::{Encoder, EncoderConfig, FrameType, TcpSink, VideoCodec, VideoFrame};
//!
//! let sink = TcpSink::connect("192.168.1.100:6605")?;
//! let config = EncoderConfig::new("013912345678", 1, VideoCodec::H265);
//! let mut encoder = Encoder::new(config, sink)?;
//!
//! let frame = [0u8, 0, 0, 1, 0x26, 0x01, 0xaf];
//! let sent = encoder.encode_video_frame(&VideoFrame::new(&frame, FrameType::I, true, 0))?;
//! assert_eq!(sent, 1);
//! # Ok::<(), jtt1078::Jtt1078Error>(())
//! ```

pub mod clock;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fragment;
pub mod frame;
pub mod media;
pub mod packet;
pub mod sim;
pub mod tracker;
pub mod transport;
pub mod wire;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EncoderConfig, StreamConfig};
pub use encoder::{Encoder, EncoderState, EncoderStats};
pub use error::{Jtt1078Error, Result};
pub use frame::{AudioFrame, FrameType, VideoFrame};
pub use transport::{MemorySink, PacketSink, SharedSink, TcpSink};
pub use wire::{AudioCodec, DataType, PacketHeader, Subpackage, VideoCodec};
