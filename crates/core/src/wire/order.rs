//! Network byte order helpers.
//!
//! 16- and 32-bit fields are plain big-endian. The 64-bit timestamp is
//! defined by the protocol as a composition: each 32-bit half is converted
//! to network order on its own and the two halves swap places. On the wire
//! this produces the high word first, each word big-endian.

/// Encode a 16-bit field in network order.
pub fn put_u16(buf: &mut [u8], value: u16) {
    buf[..2].copy_from_slice(&value.to_be_bytes());
}

/// Encode a 32-bit field in network order.
pub fn put_u32(buf: &mut [u8], value: u32) {
    buf[..4].copy_from_slice(&value.to_be_bytes());
}

pub fn get_u16(buf: &[u8]) -> u16 {
    u16::from_be_bytes([buf[0], buf[1]])
}

pub fn get_u32(buf: &[u8]) -> u32 {
    u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]])
}

/// Word-swap encoding of a 64-bit value.
///
/// The low word and high word are each rendered big-endian, then the high
/// word is placed first.
pub fn word_swap_u64(value: u64) -> [u8; 8] {
    let high = (value >> 32) as u32;
    let low = value as u32;

    let mut out = [0u8; 8];
    put_u32(&mut out[0..4], high);
    put_u32(&mut out[4..8], low);
    out
}

/// Inverse of [`word_swap_u64`].
pub fn word_unswap_u64(bytes: &[u8; 8]) -> u64 {
    let high = get_u32(&bytes[0..4]) as u64;
    let low = get_u32(&bytes[4..8]) as u64;
    (high << 32) | low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_swap_layout() {
        assert_eq!(
            word_swap_u64(0x0102_0304_0506_0708),
            [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }

    #[test]
    fn word_swap_small_value() {
        // 40 ms lands in the last byte.
        assert_eq!(word_swap_u64(40), [0, 0, 0, 0, 0, 0, 0, 40]);
    }

    #[test]
    fn word_swap_independent_of_host_order() {
        for v in [0u64, 1, 0xFFFF_FFFF, 0x1_0000_0000, u64::MAX, 0xDEAD_BEEF_0BAD_F00D] {
            assert_eq!(word_swap_u64(v), v.to_be_bytes());
            assert_eq!(word_unswap_u64(&word_swap_u64(v)), v);
        }
    }

    #[test]
    fn u16_u32_big_endian() {
        let mut buf = [0u8; 4];
        put_u16(&mut buf, 0xABCD);
        assert_eq!(&buf[..2], &[0xAB, 0xCD]);
        put_u32(&mut buf, 0x3031_6364);
        assert_eq!(buf, *b"01cd");
        assert_eq!(get_u32(&buf), 0x3031_6364);
    }
}
