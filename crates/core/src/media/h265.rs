//! H.265 (HEVC) NAL unit classification (ITU-T H.265 §7.3.1).
//!
//! The header is 2 bytes; the NAL type is in bits 1..6 of the first byte.

pub const NAL_BLA_W_LP: u8 = 16;
pub const NAL_RSV_IRAP_23: u8 = 23;
pub const NAL_VPS: u8 = 32;
pub const NAL_SPS: u8 = 33;
pub const NAL_PPS: u8 = 34;
pub const NAL_AUD: u8 = 35;
pub const NAL_PREFIX_SEI: u8 = 39;

pub fn nal_type(nal: &[u8]) -> Option<u8> {
    nal.first().map(|b| (b >> 1) & 0x3f)
}

/// VCL NAL units (types 0–31).
pub fn is_vcl(nal: &[u8]) -> bool {
    nal.len() >= 2 && matches!(nal_type(nal), Some(0..=31))
}

/// IRAP pictures (BLA, IDR, CRA and reserved IRAP types).
pub fn is_keyframe(nal: &[u8]) -> bool {
    matches!(nal_type(nal), Some(NAL_BLA_W_LP..=NAL_RSV_IRAP_23))
}

/// `first_slice_segment_in_pic_flag`, the first bit after the 2-byte header.
pub fn is_first_slice(nal: &[u8]) -> bool {
    is_vcl(nal) && nal.get(2).is_some_and(|b| b & 0x80 != 0)
}

pub fn is_access_unit_prefix(nal: &[u8]) -> bool {
    matches!(
        nal_type(nal),
        Some(NAL_VPS | NAL_SPS | NAL_PPS | NAL_AUD | NAL_PREFIX_SEI | 41..=44 | 48..=55)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idr_w_radl_is_keyframe() {
        // Type 19 → 0x26 0x01
        let nal = [0x26, 0x01, 0xAF];
        assert_eq!(nal_type(&nal), Some(19));
        assert!(is_keyframe(&nal));
        assert!(is_first_slice(&nal));
    }

    #[test]
    fn trail_r_is_not_keyframe() {
        // Type 1 → 0x02 0x01
        let nal = [0x02, 0x01, 0xD0];
        assert!(is_vcl(&nal));
        assert!(!is_keyframe(&nal));
    }

    #[test]
    fn vps_sps_pps_prefix() {
        assert!(is_access_unit_prefix(&[0x40, 0x01]));
        assert!(is_access_unit_prefix(&[0x42, 0x01]));
        assert!(is_access_unit_prefix(&[0x44, 0x01]));
        assert!(!is_vcl(&[0x40, 0x01]));
    }
}
