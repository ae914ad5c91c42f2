//! Replay-sensing read façade handed to decode logic.
//!
//! Every read on [`ReplayBuf`] either returns a value or the [`Suspend`]
//! signal. Decode logic propagates the signal with `?`; the driver rewinds the
//! cursor and tries again when more bytes arrive. Decoders can therefore be
//! written as if the whole message were already buffered.

use bytes::Bytes;

use crate::{
    buffer::AccumulationBuffer,
    byte_order::{read_network_u16, read_network_u32},
    state::StateCarrier,
};

/// Signal that the buffered bytes cannot satisfy a read yet.
///
/// This is not an error; it is consumed by the driver and never surfaces to
/// callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suspend;

/// Result of a delimiter scan that did not find the delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanError {
    /// The delimiter may still arrive.
    Suspend,
    /// More than `limit` bytes are readable and none of them is the
    /// delimiter.
    LimitExceeded {
        /// Readable bytes inspected.
        scanned: usize,
        /// Configured scan limit.
        limit: usize,
    },
}

impl From<Suspend> for ScanError {
    fn from(_: Suspend) -> Self { Self::Suspend }
}

/// Read view over a connection's buffer for one decode attempt.
///
/// Created by the driver for each attempt; decode logic never constructs one
/// itself.
#[derive(Debug)]
pub struct ReplayBuf<'a, S> {
    buffer: &'a mut AccumulationBuffer,
    state: &'a mut StateCarrier<S>,
    scan_limit: Option<usize>,
    finishing: bool,
}

impl<'a, S> ReplayBuf<'a, S> {
    pub(crate) fn new(
        buffer: &'a mut AccumulationBuffer,
        state: &'a mut StateCarrier<S>,
        scan_limit: Option<usize>,
        finishing: bool,
    ) -> Self {
        Self {
            buffer,
            state,
            scan_limit,
            finishing,
        }
    }

    /// Protocol state as of the last committed checkpoint.
    #[must_use]
    pub fn state(&self) -> &S { self.state.get() }

    /// True during the single attempt made after the stream ended.
    #[must_use]
    pub fn is_finishing(&self) -> bool { self.finishing }

    /// Bytes readable from the cursor.
    #[must_use]
    pub fn readable_bytes(&self) -> usize { self.buffer.readable_bytes() }

    /// Unread bytes, without moving the cursor.
    #[must_use]
    pub fn unread(&self) -> &[u8] { self.buffer.unread() }

    /// Read one byte.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if no byte is buffered.
    pub fn read_u8(&mut self) -> Result<u8, Suspend> { self.buffer.read_u8() }

    /// Read a network-order `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if fewer than two bytes are buffered.
    pub fn read_u16(&mut self) -> Result<u16, Suspend> {
        self.buffer.read_array().map(read_network_u16)
    }

    /// Read a network-order `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if fewer than four bytes are buffered.
    pub fn read_u32(&mut self) -> Result<u32, Suspend> {
        self.buffer.read_array().map(read_network_u32)
    }

    /// Read `n` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if fewer than `n` bytes are buffered.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes, Suspend> { self.buffer.read(n) }

    /// Skip `n` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if fewer than `n` bytes are buffered.
    pub fn skip(&mut self, n: usize) -> Result<(), Suspend> { self.buffer.skip(n) }

    /// Look at the next byte without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if no byte is buffered.
    pub fn peek_u8(&self) -> Result<u8, Suspend> { self.buffer.peek_u8() }

    /// Distance from the cursor to the next `delimiter`, honouring the
    /// connection's configured scan limit.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Suspend`] while the delimiter may still arrive, or
    /// [`ScanError::LimitExceeded`] when a scan limit is configured and
    /// exceeded.
    pub fn bytes_before(&self, delimiter: u8) -> Result<usize, ScanError> {
        self.buffer.scan_for(delimiter, self.scan_limit)
    }

    /// Distance to the next `delimiter`, which must lie within `limit` bytes.
    ///
    /// The tighter of `limit` and the configured scan limit applies.
    ///
    /// # Errors
    ///
    /// As for [`bytes_before`](Self::bytes_before).
    pub fn bytes_before_within(&self, delimiter: u8, limit: usize) -> Result<usize, ScanError> {
        let limit = self.scan_limit.map_or(limit, |configured| configured.min(limit));
        self.buffer.scan_for(delimiter, Some(limit))
    }

    /// Commit everything read so far in this attempt.
    ///
    /// A later suspension in the same attempt rewinds only to here.
    pub fn checkpoint(&mut self) { self.buffer.checkpoint(); }
}

impl<S: PartialEq> ReplayBuf<'_, S> {
    /// Commit everything read so far and move to protocol state `next`.
    ///
    /// Moving to the state already held commits the bytes but is not a state
    /// change.
    pub fn checkpoint_with(&mut self, next: S) {
        self.buffer.checkpoint();
        if self.state.set(next) {
            tracing::trace!(position = self.buffer.cursor(), "checkpoint with state update");
        }
    }
}
