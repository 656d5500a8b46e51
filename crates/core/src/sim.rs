//! SIM number ↔ BCD conversion.
//!
//! The terminal identity is carried as 6 bytes of packed decimal, two digits
//! per byte with the earlier digit in the high nibble:
//!
//! ```text
//! "013912345678" → 01 39 12 34 56 78
//! "12345"        → 12 34 50 00 00 00
//! ```

/// Number of BCD bytes in the wire identity.
pub const SIM_BCD_LEN: usize = 6;

/// Maximum number of digits carried on the wire.
pub const SIM_MAX_DIGITS: usize = SIM_BCD_LEN * 2;

/// Encode a SIM number string into 6 BCD bytes.
///
/// Digits beyond the 12th are ignored and missing positions encode as 0.
/// Never fails: an empty string yields all zeros. Input is not validated
/// here, so a non-digit byte contributes its low nibble after subtracting
/// `'0'`; [`EncoderConfig::validate`](crate::EncoderConfig::validate) rejects
/// such identities up front.
pub fn encode_bcd(sim: &str) -> [u8; SIM_BCD_LEN] {
    let digits = sim.as_bytes();
    let len = digits.len().min(SIM_MAX_DIGITS);
    let nibble = |idx: usize| -> u8 {
        if idx < len {
            digits[idx].wrapping_sub(b'0') & 0x0f
        } else {
            0
        }
    };

    let mut bcd = [0u8; SIM_BCD_LEN];
    for (i, byte) in bcd.iter_mut().enumerate() {
        *byte = (nibble(i * 2) << 4) | nibble(i * 2 + 1);
    }
    bcd
}

/// Render 6 BCD bytes back into their 12 digits.
///
/// Nibbles above 9 are rendered as hex so corrupt identities stay visible in logs.
pub fn decode_bcd(bcd: &[u8; SIM_BCD_LEN]) -> String {
    bcd.iter()
        .flat_map(|b| [b >> 4, b & 0x0f])
        .map(|n| char::from_digit(n as u32, 16).unwrap_or('?'))
        .collect()
}
