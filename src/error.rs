//! Error types for the replaying decoder.
//!
//! Insufficient input is not an error here: it travels as
//! [`Interrupt::Suspend`](crate::Interrupt::Suspend) and never leaves the
//! driver. What remains are terminal faults:
//!
//! - [`FramingError`]: wire-level violations such as a peer that never sends a terminator and
//!   grows the buffer past its limit.
//! - [`ReplayError`]: the driver-level wrapper, adding protocol faults raised by decode logic,
//!   lifecycle misuse, and transport I/O failures.

use std::io;

use thiserror::Error;

/// Framing-level faults detected while accumulating or scanning input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// Buffered but undecoded bytes exceed the configured maximum.
    #[error("buffered bytes exceed limit: {buffered} > {limit}")]
    BufferLimitExceeded {
        /// Bytes held when the limit was checked.
        buffered: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// A bounded delimiter scan gave up before finding the delimiter.
    #[error("delimiter not found within {limit} bytes ({scanned} scanned)")]
    DelimiterNotFound {
        /// Readable bytes inspected by the scan.
        scanned: usize,
        /// Maximum distance the delimiter may appear at.
        limit: usize,
    },

    /// A declared frame length exceeds the decoder's maximum.
    #[error("frame exceeds max length: {size} > {max}")]
    OversizedFrame {
        /// Size announced by the frame header.
        size: usize,
        /// Maximum accepted frame size.
        max: usize,
    },

    /// Frame length prefix is malformed.
    #[error("invalid frame length encoding")]
    InvalidLengthEncoding,
}

impl From<FramingError> for io::Error {
    fn from(err: FramingError) -> Self { io::Error::new(io::ErrorKind::InvalidData, err) }
}

/// Terminal failure surfaced by [`ReplayDriver`](crate::ReplayDriver).
///
/// Once any variant other than [`ReplayError::Closed`] has been returned
/// from a decoding call, the driver refuses further input.
///
/// # Examples
///
/// ```
/// use replayframe::{FramingError, ReplayError};
///
/// let err: ReplayError<std::convert::Infallible> =
///     ReplayError::Framing(FramingError::BufferLimitExceeded {
///         buffered: 2048,
///         limit: 1024,
///     });
///
/// assert!(err.is_framing());
/// assert_eq!(err.error_type(), "framing");
/// ```
#[derive(Debug, Error)]
pub enum ReplayError<E> {
    /// Framing violation, including the buffer size limit.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// Fault raised by protocol decode logic.
    #[error("decode error: {0}")]
    Decode(#[source] E),

    /// Decode logic produced a message without consuming input or changing
    /// state, which would otherwise repeat forever.
    #[error("decoder produced a message without consuming any input")]
    Stalled,

    /// Input arrived after the stream had already ended.
    #[error("decoder is closed")]
    Closed,

    /// Input arrived after an earlier terminal fault.
    #[error("decoder has already faulted")]
    Faulted,

    /// Transport error reported by the enclosing reader.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl<E> ReplayError<E> {
    /// Returns true for framing faults, including the buffer limit.
    #[must_use]
    pub fn is_framing(&self) -> bool { matches!(self, Self::Framing(_)) }

    /// Returns true if the buffer size limit was exceeded.
    #[must_use]
    pub fn is_buffer_limit(&self) -> bool {
        matches!(
            self,
            Self::Framing(FramingError::BufferLimitExceeded { .. })
        )
    }

    /// Returns the error category for logging and metrics.
    ///
    /// One of `"framing"`, `"decode"`, `"stalled"`, `"closed"`, `"faulted"`
    /// or `"io"`.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Framing(_) => "framing",
            Self::Decode(_) => "decode",
            Self::Stalled => "stalled",
            Self::Closed => "closed",
            Self::Faulted => "faulted",
            Self::Io(_) => "io",
        }
    }
}

impl<E> From<ReplayError<E>> for io::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: ReplayError<E>) -> Self {
        match err {
            ReplayError::Io(e) => e,
            ReplayError::Framing(e) => e.into(),
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
