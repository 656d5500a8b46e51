//! JT/T 1078 wire format.
//!
//! Every packet is a fixed header ([`header::PacketHeader`]) followed by up
//! to [`MAX_PAYLOAD_SIZE`] bytes of media:
//!
//! ```text
//! +------+-----+-----+-----+-----+----+----+-------+------+--------+--------+-----+
//! | flag | VPXC| M/PT| seq | SIM | ch | dt | SP/rsv|  ts  | I-int  | f-int  | len |
//! |  4   |  1  |  1  |  2  |  6  | 1  | 1  |   1   |  8   |   2    |   2    |  2  |
//! +------+-----+-----+-----+-----+----+----+-------+------+--------+--------+-----+
//! ```
//!
//! The layout is fixed by the standard, so it is packed and unpacked by hand
//! in [`header`] instead of relying on struct layout.

pub mod header;
pub mod order;

pub use header::PacketHeader;

/// Fixed header flag, `"01cd"` in ASCII.
pub const HEADER_FLAG: u32 = 0x3031_6364;

/// Header length as it appears on the wire.
pub const HEADER_LEN: usize = 31;

/// Nominal header size used by the standard when budgeting packet size.
pub const NOMINAL_HEADER_SIZE: usize = 30;

/// Practical packet size ceiling for TCP delivery.
pub const MAX_PACKET_SIZE: usize = 950;

/// Largest payload carried in one packet (`M`).
pub const MAX_PAYLOAD_SIZE: usize = MAX_PACKET_SIZE - NOMINAL_HEADER_SIZE;

/// RTP version carried in byte 4.
pub const RTP_VERSION: u8 = 2;

/// Data type byte (offset 15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    VideoI = 0x00,
    VideoP = 0x01,
    VideoB = 0x02,
    Audio = 0x03,
    Passthrough = 0x04,
}

impl DataType {
    /// Whether packets of this type drive the I-frame interval bookkeeping.
    pub fn is_keyframe(self) -> bool {
        self == Self::VideoI
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::VideoI),
            0x01 => Some(Self::VideoP),
            0x02 => Some(Self::VideoB),
            0x03 => Some(Self::Audio),
            0x04 => Some(Self::Passthrough),
            _ => None,
        }
    }
}

/// Subpackage marker (top two bits of byte 16).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Subpackage {
    /// The whole frame fits in one packet.
    Atomic = 0b00,
    First = 0b01,
    Last = 0b10,
    Middle = 0b11,
}

impl Subpackage {
    /// The RTP marker bit is set on the terminal chunk of a frame.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Atomic | Self::Last)
    }

    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Atomic,
            0b01 => Self::First,
            0b10 => Self::Last,
            _ => Self::Middle,
        }
    }
}

/// Video codec of the session; selects the RTP payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoCodec {
    #[default]
    H264,
    H265,
}

impl VideoCodec {
    /// Dynamic RTP payload type used for every packet of the session.
    pub fn payload_type(self) -> u8 {
        match self {
            Self::H264 => 96,
            Self::H265 => 98,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::H264 => "H.264",
            Self::H265 => "H.265",
        }
    }
}

/// Audio codec tag stored with the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AudioCodec {
    #[default]
    G711A = 0x01,
    G711U = 0x02,
    Aac = 0x13,
}
