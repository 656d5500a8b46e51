use std::fmt;

use super::order::{get_u16, get_u32, put_u16, put_u32, word_swap_u64, word_unswap_u64};
use super::{DataType, HEADER_FLAG, HEADER_LEN, RTP_VERSION, Subpackage};
use crate::sim::{SIM_BCD_LEN, decode_bcd};

/// JT/T 1078 packet header.
///
/// | Offset | Field |
/// |--------|-------|
/// | 0–3    | header flag |
/// | 4      | V(2) P(1) X(1) CC(4) |
/// | 5      | M(1) PT(7) |
/// | 6–7    | packet sequence |
/// | 8–13   | SIM (BCD) |
/// | 14     | channel |
/// | 15     | data type |
/// | 16     | subpackage(2) reserved(6) |
/// | 17–24  | relative timestamp (ms) |
/// | 25–26  | interval since last I-frame (ms) |
/// | 27–28  | interval since last packet (ms) |
/// | 29–30  | payload length |
///
/// Padding, extension and CSRC count are always 0; version is always 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketHeader {
    pub marker: bool,
    /// RTP payload type (7-bit).
    pub payload_type: u8,
    pub sequence: u16,
    pub sim: [u8; SIM_BCD_LEN],
    pub channel: u8,
    pub data_type: DataType,
    pub subpackage: Subpackage,
    /// Milliseconds since the session started.
    pub timestamp: u64,
    pub last_i_frame_interval: u16,
    pub last_frame_interval: u16,
    pub payload_len: u16,
}

impl PacketHeader {
    /// Serialize the header. Pure; the caller fills every field beforehand.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];

        put_u32(&mut buf[0..4], HEADER_FLAG);
        buf[4] = RTP_VERSION << 6;
        buf[5] = ((self.marker as u8) << 7) | (self.payload_type & 0x7f);
        put_u16(&mut buf[6..8], self.sequence);
        buf[8..14].copy_from_slice(&self.sim);
        buf[14] = self.channel;
        buf[15] = self.data_type as u8;
        buf[16] = (self.subpackage as u8) << 6;
        buf[17..25].copy_from_slice(&word_swap_u64(self.timestamp));
        put_u16(&mut buf[25..27], self.last_i_frame_interval);
        put_u16(&mut buf[27..29], self.last_frame_interval);
        put_u16(&mut buf[29..31], self.payload_len);

        buf
    }

    /// Unpack a header from the start of `buf`.
    ///
    /// Returns `None` when the buffer is too short, the header flag or
    /// version does not match, or the data type is unknown.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_LEN {
            return None;
        }
        if get_u32(&buf[0..4]) != HEADER_FLAG || buf[4] >> 6 != RTP_VERSION {
            return None;
        }

        let mut sim = [0u8; SIM_BCD_LEN];
        sim.copy_from_slice(&buf[8..14]);
        let mut ts = [0u8; 8];
        ts.copy_from_slice(&buf[17..25]);

        Some(Self {
            marker: buf[5] & 0x80 != 0,
            payload_type: buf[5] & 0x7f,
            sequence: get_u16(&buf[6..8]),
            sim,
            channel: buf[14],
            data_type: DataType::from_u8(buf[15])?,
            subpackage: Subpackage::from_bits(buf[16] >> 6),
            timestamp: word_unswap_u64(&ts),
            last_i_frame_interval: get_u16(&buf[25..27]),
            last_frame_interval: get_u16(&buf[27..29]),
            payload_len: get_u16(&buf[29..31]),
        })
    }
}

impl fmt::Display for PacketHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "flag={:#010X} v={} pt={} m={} seq={} sim={} ch={} type={:?} sub={:?} ts={}ms i_int={}ms int={}ms len={}",
            HEADER_FLAG,
            RTP_VERSION,
            self.payload_type,
            self.marker as u8,
            self.sequence,
            decode_bcd(&self.sim),
            self.channel,
            self.data_type,
            self.subpackage,
            self.timestamp,
            self.last_i_frame_interval,
            self.last_frame_interval,
            self.payload_len,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::encode_bcd;

    fn make_header() -> PacketHeader {
        PacketHeader {
            marker: true,
            payload_type: 98,
            sequence: 0x1234,
            sim: encode_bcd("013912345678"),
            channel: 1,
            data_type: DataType::VideoP,
            subpackage: Subpackage::Last,
            timestamp: 0x0000_0001_0000_0028,
            last_i_frame_interval: 1000,
            last_frame_interval: 40,
            payload_len: 360,
        }
    }

    #[test]
    fn byte_exact_layout() {
        let buf = make_header().encode();
        let expected: [u8; HEADER_LEN] = [
            0x30, 0x31, 0x63, 0x64, // flag
            0x80, // V=2
            0x80 | 98, // M=1, PT=98
            0x12, 0x34, // seq
            0x01, 0x39, 0x12, 0x34, 0x56, 0x78, // SIM
            0x01, // channel
            0x01, // P frame
            0x80, // LAST in top bits
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x28, // timestamp
            0x03, 0xE8, // I interval
            0x00, 0x28, // frame interval
            0x01, 0x68, // length
        ];
        assert_eq!(buf, expected);
    }

    #[test]
    fn version_is_2() {
        let buf = make_header().encode();
        assert_eq!(buf[4] >> 6, 2);
        assert_eq!(buf[4] & 0x3f, 0);
    }

    #[test]
    fn marker_bit_cleared() {
        let mut h = make_header();
        h.marker = false;
        let buf = h.encode();
        assert_eq!(buf[5] & 0x80, 0);
        assert_eq!(buf[5] & 0x7f, 98);
    }

    #[test]
    fn subpackage_leaves_reserved_zero() {
        let mut h = make_header();
        h.subpackage = Subpackage::Middle;
        assert_eq!(h.encode()[16], 0xC0);
        h.subpackage = Subpackage::First;
        assert_eq!(h.encode()[16], 0x40);
        h.subpackage = Subpackage::Atomic;
        assert_eq!(h.encode()[16], 0x00);
    }

    #[test]
    fn decode_mirrors_encode() {
        let h = make_header();
        assert_eq!(PacketHeader::decode(&h.encode()), Some(h));
    }

    #[test]
    fn decode_rejects_bad_flag() {
        let mut buf = make_header().encode();
        buf[0] = 0;
        assert!(PacketHeader::decode(&buf).is_none());
        assert!(PacketHeader::decode(&buf[..10]).is_none());
    }

    #[test]
    fn display_includes_sim_and_seq() {
        let text = make_header().to_string();
        assert!(text.contains("sim=013912345678"));
        assert!(text.contains("seq=4660"));
        assert!(text.contains("flag=0x30316364"));
    }
}
