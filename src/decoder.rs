//! The decode contract implemented by protocol authors.
//!
//! A [`ReplayDecoder`] reads from a [`ReplayBuf`] as though the whole message
//! were present. Each call to [`decode`](ReplayDecoder::decode) yields one of:
//!
//! | Return | Meaning |
//! |--------|---------|
//! | `Ok(Some(message))` | A message was produced. |
//! | `Ok(None)` | Nothing produced; the loop continues only if input was consumed. |
//! | `Err(Interrupt::Suspend)` | More bytes are needed; the attempt is replayed later. |
//! | `Err(Interrupt::Framing(_))` / `Err(Interrupt::Fault(_))` | Terminal fault. |
//!
//! # Examples
//!
//! ```
//! use replayframe::{Interrupt, NoState, ReplayBuf, ReplayDecoder};
//!
//! /// Messages are a one-byte length followed by that many bytes.
//! struct Tiny;
//!
//! impl ReplayDecoder for Tiny {
//!     type Item = Vec<u8>;
//!     type Error = std::convert::Infallible;
//!     type State = NoState;
//!
//!     fn decode(
//!         &mut self,
//!         buf: &mut ReplayBuf<'_, NoState>,
//!     ) -> Result<Option<Vec<u8>>, Interrupt<Self::Error>> {
//!         let len = buf.read_u8()?;
//!         Ok(Some(buf.read_bytes(usize::from(len))?.to_vec()))
//!     }
//! }
//! ```

use std::fmt;

use crate::{
    error::FramingError,
    replay::{ReplayBuf, ScanError, Suspend},
};

/// Why a decode attempt stopped without producing a message.
#[derive(Debug)]
pub enum Interrupt<E> {
    /// Not enough bytes are buffered; rewind and wait for more.
    Suspend,
    /// Framing violation, such as an exceeded scan limit.
    Framing(FramingError),
    /// Protocol fault raised by the decode logic.
    Fault(E),
}

impl<E> Interrupt<E> {
    /// Wrap a protocol fault.
    pub fn fault(err: impl Into<E>) -> Self { Self::Fault(err.into()) }

    /// True for the suspension signal.
    #[must_use]
    pub fn is_suspend(&self) -> bool { matches!(self, Self::Suspend) }
}

impl<E> From<Suspend> for Interrupt<E> {
    fn from(_: Suspend) -> Self { Self::Suspend }
}

impl<E> From<FramingError> for Interrupt<E> {
    fn from(err: FramingError) -> Self { Self::Framing(err) }
}

impl<E> From<ScanError> for Interrupt<E> {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Suspend => Self::Suspend,
            ScanError::LimitExceeded { scanned, limit } => {
                Self::Framing(FramingError::DelimiterNotFound { scanned, limit })
            }
        }
    }
}

/// Outcome of a single decode attempt.
pub type DecodeResult<T, E> = Result<Option<T>, Interrupt<E>>;

/// Protocol decode logic driven by [`ReplayDriver`](crate::ReplayDriver).
pub trait ReplayDecoder {
    /// Message type produced.
    type Item;
    /// Protocol fault type.
    type Error: std::error::Error + Send + Sync + 'static;
    /// Protocol step carried between attempts; use
    /// [`NoState`](crate::NoState) when only the buffer position matters.
    ///
    /// Re-committing an equal value does not count as progress.
    type State: Default + PartialEq + fmt::Debug;

    /// Attempt to decode one message from `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupt::Suspend`] when more input is needed, or a
    /// terminal [`Interrupt::Framing`] / [`Interrupt::Fault`].
    fn decode(&mut self, buf: &mut ReplayBuf<'_, Self::State>) -> DecodeResult<Self::Item, Self::Error>;

    /// Final attempt made once the stream has ended.
    ///
    /// Suspension here means the trailing bytes are truncated and they are
    /// discarded. Defaults to [`decode`](Self::decode).
    ///
    /// # Errors
    ///
    /// As for [`decode`](Self::decode).
    fn decode_last(
        &mut self,
        buf: &mut ReplayBuf<'_, Self::State>,
    ) -> DecodeResult<Self::Item, Self::Error> {
        self.decode(buf)
    }
}
