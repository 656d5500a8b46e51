//! Packet sequence and timing bookkeeping.
//!
//! One [`SequenceTracker`] lives inside each encoder session. It is advanced
//! exactly once per constructed packet, before the packet is sent, so a
//! failed send still consumes a sequence number and shifts the interval
//! baseline. Intervals are computed per packet, not per frame: the chunks of
//! a fragmented frame after the first report the spacing between chunks.

use crate::clock::Clock;
use crate::wire::DataType;

/// Timing and sequence values for one packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub sequence: u16,
    /// Milliseconds since the session started.
    pub timestamp: u64,
    pub frame_interval: u16,
    pub i_frame_interval: u16,
}

#[derive(Debug)]
pub struct SequenceTracker<C> {
    clock: C,
    start_ms: u64,
    sequence: u16,
    last_timestamp: Option<u64>,
    last_i_timestamp: Option<u64>,
    frame_interval: u16,
    i_frame_interval: u16,
}

impl<C: Clock> SequenceTracker<C> {
    /// Start tracking; the current time becomes timestamp 0.
    pub fn new(clock: C) -> Self {
        let start_ms = clock.now_ms();
        Self {
            clock,
            start_ms,
            sequence: 0,
            last_timestamp: None,
            last_i_timestamp: None,
            frame_interval: 0,
            i_frame_interval: 0,
        }
    }

    /// Sequence number the next packet will carry.
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Advance state for one packet of `data_type` and return its header values.
    pub fn stamp(&mut self, data_type: DataType) -> Stamp {
        let relative = self.clock.now_ms().saturating_sub(self.start_ms);

        if let Some(last) = self.last_timestamp {
            self.frame_interval = relative.wrapping_sub(last) as u16;
        }
        if data_type.is_keyframe()
            && let Some(last_i) = self.last_i_timestamp
        {
            self.i_frame_interval = relative.wrapping_sub(last_i) as u16;
        }

        self.last_timestamp = Some(relative);
        if data_type.is_keyframe() {
            self.last_i_timestamp = Some(relative);
        }

        let sequence = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);

        Stamp {
            sequence,
            timestamp: relative,
            frame_interval: self.frame_interval,
            i_frame_interval: self.i_frame_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn make_tracker() -> (SequenceTracker<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        (SequenceTracker::new(clock.clone()), clock)
    }

    #[test]
    fn first_packet_is_zero() {
        let (mut t, _) = make_tracker();
        let s = t.stamp(DataType::VideoI);
        assert_eq!(s.sequence, 0);
        assert_eq!(s.timestamp, 0);
        assert_eq!(s.frame_interval, 0);
        assert_eq!(s.i_frame_interval, 0);
    }

    #[test]
    fn frame_interval_from_previous_packet() {
        let (mut t, clock) = make_tracker();
        t.stamp(DataType::VideoI);
        clock.advance(40);
        let s = t.stamp(DataType::VideoP);
        assert_eq!(s.timestamp, 40);
        assert_eq!(s.frame_interval, 40);
        assert_eq!(s.i_frame_interval, 0);
    }

    #[test]
    fn i_frame_interval_only_moves_on_keyframes() {
        let (mut t, clock) = make_tracker();
        t.stamp(DataType::VideoI);
        clock.advance(40);
        t.stamp(DataType::VideoP);
        clock.advance(40);
        let p = t.stamp(DataType::Audio);
        assert_eq!(p.i_frame_interval, 0);
        clock.advance(920);
        let i = t.stamp(DataType::VideoI);
        assert_eq!(i.timestamp, 1000);
        assert_eq!(i.i_frame_interval, 1000);
        assert_eq!(i.frame_interval, 920);
        clock.advance(40);
        // Retained on non-keyframes.
        assert_eq!(t.stamp(DataType::VideoB).i_frame_interval, 1000);
    }

    #[test]
    fn intervals_computed_per_packet() {
        let (mut t, clock) = make_tracker();
        t.stamp(DataType::VideoI);
        clock.advance(40);
        let first_chunk = t.stamp(DataType::VideoP);
        let second_chunk = t.stamp(DataType::VideoP);
        assert_eq!(first_chunk.frame_interval, 40);
        assert_eq!(second_chunk.frame_interval, 0);
    }

    #[test]
    fn interval_truncates_to_u16() {
        let (mut t, clock) = make_tracker();
        t.stamp(DataType::VideoP);
        clock.advance(70_000);
        assert_eq!(t.stamp(DataType::VideoP).frame_interval, (70_000u64 as u16));
    }

    #[test]
    fn sequence_wraps() {
        let (mut t, _) = make_tracker();
        t.sequence = u16::MAX;
        assert_eq!(t.stamp(DataType::Audio).sequence, u16::MAX);
        assert_eq!(t.sequence(), 0);
        assert_eq!(t.stamp(DataType::Audio).sequence, 0);
    }

    #[test]
    fn clock_going_backwards_clamps_to_zero() {
        let (mut t, clock) = make_tracker();
        clock.set(0);
        assert_eq!(t.stamp(DataType::VideoI).timestamp, 0);
    }
}
