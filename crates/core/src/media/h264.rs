//! H.264 NAL unit classification (ITU-T H.264 §7.3.1).
//!
//! The NAL type is the low 5 bits of the single header byte.

pub const NAL_SLICE: u8 = 1;
pub const NAL_IDR: u8 = 5;
pub const NAL_SEI: u8 = 6;
pub const NAL_SPS: u8 = 7;
pub const NAL_PPS: u8 = 8;
pub const NAL_AUD: u8 = 9;

pub fn nal_type(nal: &[u8]) -> Option<u8> {
    nal.first().map(|b| b & 0x1f)
}

/// Coded slice NAL units (types 1–5).
pub fn is_vcl(nal: &[u8]) -> bool {
    matches!(nal_type(nal), Some(NAL_SLICE..=NAL_IDR))
}

pub fn is_keyframe(nal: &[u8]) -> bool {
    nal_type(nal) == Some(NAL_IDR)
}

/// Whether this slice starts a new picture.
///
/// `first_mb_in_slice` is the first `ue(v)` after the header; it is zero
/// exactly when its leading bit is 1.
pub fn is_first_slice(nal: &[u8]) -> bool {
    is_vcl(nal) && nal.get(1).is_some_and(|b| b & 0x80 != 0)
}

/// Non-VCL units that may only appear before the first slice of an access unit.
pub fn is_access_unit_prefix(nal: &[u8]) -> bool {
    matches!(
        nal_type(nal),
        Some(NAL_SEI | NAL_SPS | NAL_PPS | NAL_AUD | 14..=18)
    )
}
