//! Error types for the JT/T 1078 packetizer.

use std::fmt;

/// Errors that can occur while packetizing and delivering a stream.
///
/// Variants fall into three classes:
///
/// - **Invalid input**: [`PayloadTooLarge`](Self::PayloadTooLarge),
///   [`Config`](Self::Config). Rejected before any session state changes.
/// - **Transport**: [`Io`](Self::Io), [`ShortWrite`](Self::ShortWrite).
///   Raised by the sink; the sequence number of the chunk is already spent.
/// - **Resource**: [`BufferExhausted`](Self::BufferExhausted). The
///   serialization buffer could not be reserved after the chunk was stamped.
///
/// Frame-level operations wrap the chunk error in
/// [`FrameAborted`](Self::FrameAborted) so callers can see how much of the
/// frame reached the wire.
#[derive(Debug, thiserror::Error)]
pub enum Jtt1078Error {
    /// Underlying I/O or socket error reported by the sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink accepted only part of a packet.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// A chunk larger than the negotiated maximum payload was handed to the assembler.
    #[error("payload too large: {len} > {max}")]
    PayloadTooLarge { len: usize, max: usize },

    /// No serialization buffer could be reserved for a packet.
    #[error("failed to allocate {len} byte send buffer")]
    BufferExhausted { len: usize },

    /// A frame was abandoned part-way; `sent` chunks of `total` reached the sink.
    #[error("frame aborted after {sent}/{total} packets: {source}")]
    FrameAborted {
        sent: usize,
        total: usize,
        #[source]
        source: Box<Jtt1078Error>,
    },

    /// Invalid encoder or stream configuration.
    #[error("configuration error: {kind}")]
    Config { kind: ConfigErrorKind },
}

impl Jtt1078Error {
    /// Number of chunks delivered before a frame was aborted, if this is a frame-level failure.
    pub fn packets_sent(&self) -> Option<usize> {
        match self {
            Self::FrameAborted { sent, .. } => Some(*sent),
            _ => None,
        }
    }
}

/// Specific kind of configuration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// SIM number longer than 12 characters.
    SimTooLong(usize),
    /// SIM number containing something other than ASCII digits.
    SimNotNumeric,
    /// Maximum payload outside `1..=65535`.
    InvalidMaxPayload(usize),
    /// A config file line that is not `KEY=VALUE`.
    InvalidLine(usize),
    /// A value that failed to parse for the given key.
    InvalidValue(String),
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimTooLong(len) => write!(f, "SIM number has {len} digits, at most 12 allowed"),
            Self::SimNotNumeric => write!(f, "SIM number must contain only digits"),
            Self::InvalidMaxPayload(len) => write!(f, "invalid maximum payload size {len}"),
            Self::InvalidLine(line) => write!(f, "malformed line {line}"),
            Self::InvalidValue(key) => write!(f, "invalid value for {key}"),
        }
    }
}

impl From<ConfigErrorKind> for Jtt1078Error {
    fn from(kind: ConfigErrorKind) -> Self {
        Self::Config { kind }
    }
}

/// Convenience alias for `Result<T, Jtt1078Error>`.
pub type Result<T> = std::result::Result<T, Jtt1078Error>;
