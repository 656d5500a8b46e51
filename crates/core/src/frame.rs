//! Encoded media frames handed to the encoder by the capture pipeline.

use crate::wire::DataType;

/// Picture type reported by the video encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    I,
    P,
    B,
}

/// One encoded video frame (access unit).
#[derive(Debug, Clone, Copy)]
pub struct VideoFrame<'a> {
    pub data: &'a [u8],
    pub frame_type: FrameType,
    /// IDR / random access point as flagged by the encoder.
    pub keyframe: bool,
    /// Capture timestamp in ms. Logged only; wire timestamps come from the session clock.
    pub pts: u64,
}

impl<'a> VideoFrame<'a> {
    pub fn new(data: &'a [u8], frame_type: FrameType, keyframe: bool, pts: u64) -> Self {
        Self {
            data,
            frame_type,
            keyframe,
            pts,
        }
    }

    /// Data type shared by every chunk of this frame.
    ///
    /// A keyframe flag wins over the reported picture type.
    pub fn data_type(&self) -> DataType {
        if self.keyframe || self.frame_type == FrameType::I {
            DataType::VideoI
        } else if self.frame_type == FrameType::P {
            DataType::VideoP
        } else {
            DataType::VideoB
        }
    }
}

/// One encoded audio frame.
#[derive(Debug, Clone, Copy)]
pub struct AudioFrame<'a> {
    pub data: &'a [u8],
    pub pts: u64,
}

impl<'a> AudioFrame<'a> {
    pub fn new(data: &'a [u8], pts: u64) -> Self {
        Self { data, pts }
    }
}
