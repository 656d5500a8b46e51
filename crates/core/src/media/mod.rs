//! Recorded elementary stream input.
//!
//! Splits an Annex B H.264/H.265 byte stream into access units (one per
//! picture) and classifies each as a keyframe or not, producing the frames
//! an [`Encoder`](crate::Encoder) expects from a capture pipeline.
//!
//! | Codec | Module | Keyframe |
//! |-------|--------|----------|
//! | H.264 | [`h264`] | IDR slice (type 5) |
//! | H.265 | [`h265`] | IRAP slice (types 16–23) |
//!
//! Slice types are not parsed, so pictures that are not random access
//! points are reported as [`FrameType::P`].

pub mod annexb;
pub mod h264;
pub mod h265;

use crate::frame::{FrameType, VideoFrame};
use crate::wire::VideoCodec;

use annexb::{START_CODE, extract_nal_units};

/// One picture's NAL units re-joined with 4-byte start codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessUnit {
    pub data: Vec<u8>,
    pub keyframe: bool,
}

impl AccessUnit {
    pub fn frame_type(&self) -> FrameType {
        if self.keyframe {
            FrameType::I
        } else {
            FrameType::P
        }
    }

    /// Borrow as an encoder input frame.
    pub fn as_frame(&self, pts: u64) -> VideoFrame<'_> {
        VideoFrame::new(&self.data, self.frame_type(), self.keyframe, pts)
    }
}

struct NalRules {
    is_vcl: fn(&[u8]) -> bool,
    is_keyframe: fn(&[u8]) -> bool,
    is_first_slice: fn(&[u8]) -> bool,
    is_prefix: fn(&[u8]) -> bool,
}

fn rules(codec: VideoCodec) -> NalRules {
    match codec {
        VideoCodec::H264 => NalRules {
            is_vcl: h264::is_vcl,
            is_keyframe: h264::is_keyframe,
            is_first_slice: h264::is_first_slice,
            is_prefix: h264::is_access_unit_prefix,
        },
        VideoCodec::H265 => NalRules {
            is_vcl: h265::is_vcl,
            is_keyframe: h265::is_keyframe,
            is_first_slice: h265::is_first_slice,
            is_prefix: h265::is_access_unit_prefix,
        },
    }
}

/// Group the NAL units of an Annex B stream into access units.
///
/// A new access unit begins at a parameter set / delimiter / SEI, or at a
/// first slice, once the current unit already holds a slice. Parameter sets
/// therefore travel with the keyframe that follows them. Trailing non-VCL
/// units with no slice after them are dropped.
pub fn split_access_units(data: &[u8], codec: VideoCodec) -> Vec<AccessUnit> {
    let rules = rules(codec);
    let mut units = Vec::new();
    let mut current = AccessUnit {
        data: Vec::new(),
        keyframe: false,
    };
    let mut has_vcl = false;

    for nal in extract_nal_units(data) {
        let vcl = (rules.is_vcl)(nal);
        let boundary = has_vcl && ((rules.is_prefix)(nal) || (vcl && (rules.is_first_slice)(nal)));

        if boundary {
            units.push(std::mem::replace(
                &mut current,
                AccessUnit {
                    data: Vec::new(),
                    keyframe: false,
                },
            ));
            has_vcl = false;
        }

        current.data.extend_from_slice(&START_CODE);
        current.data.extend_from_slice(nal);
        if vcl {
            has_vcl = true;
            current.keyframe |= (rules.is_keyframe)(nal);
        }
    }

    if has_vcl {
        units.push(current);
    }

    tracing::debug!(
        codec = codec.name(),
        access_units = units.len(),
        keyframes = units.iter().filter(|u| u.keyframe).count(),
        "split elementary stream"
    );

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annexb(nals: &[&[u8]]) -> Vec<u8> {
        nals.iter()
            .flat_map(|n| START_CODE.iter().chain(n.iter()).copied())
            .collect()
    }

    #[test]
    fn h264_gop() {
        let sps: &[u8] = &[0x67, 0x42, 0x00, 0x1e];
        let pps: &[u8] = &[0x68, 0xce, 0x38, 0x80];
        let idr: &[u8] = &[0x65, 0x88, 0x84];
        let p1: &[u8] = &[0x41, 0x9a, 0x01];
        let p2: &[u8] = &[0x41, 0x9a, 0x02];
        let stream = annexb(&[sps, pps, idr, p1, p2]);

        let units = split_access_units(&stream, VideoCodec::H264);
        assert_eq!(units.len(), 3);
        assert!(units[0].keyframe);
        assert_eq!(units[0].data, annexb(&[sps, pps, idr]));
        assert!(!units[1].keyframe);
        assert_eq!(units[1].data, annexb(&[p1]));
        assert_eq!(units[2].frame_type(), FrameType::P);
    }

    #[test]
    fn h264_multi_slice_picture_stays_together() {
        let first: &[u8] = &[0x65, 0x88, 0x01];
        // first_mb_in_slice != 0
        let second: &[u8] = &[0x65, 0x40, 0x02];
        let next: &[u8] = &[0x41, 0x9a, 0x03];
        let units = split_access_units(&annexb(&[first, second, next]), VideoCodec::H264);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].data, annexb(&[first, second]));
    }

    #[test]
    fn h265_gop() {
        let vps: &[u8] = &[0x40, 0x01, 0x0c];
        let sps: &[u8] = &[0x42, 0x01, 0x01];
        let pps: &[u8] = &[0x44, 0x01, 0xc1];
        let idr: &[u8] = &[0x26, 0x01, 0xaf];
        let trail: &[u8] = &[0x02, 0x01, 0xd0];
        let units = split_access_units(&annexb(&[vps, sps, pps, idr, trail]), VideoCodec::H265);
        assert_eq!(units.len(), 2);
        assert!(units[0].keyframe);
        assert!(!units[1].keyframe);
        assert_eq!(units[0].as_frame(0).frame_type, FrameType::I);
    }

    #[test]
    fn parameter_sets_without_slice_dropped() {
        let sps: &[u8] = &[0x67, 0x42];
        assert!(split_access_units(&annexb(&[sps]), VideoCodec::H264).is_empty());
        assert!(split_access_units(&[], VideoCodec::H264).is_empty());
    }
}
